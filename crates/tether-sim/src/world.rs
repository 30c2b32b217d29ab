//! Simulated host objects: slots, the carried object, and the kind policy.

use std::cell::Cell;
use std::rc::Rc;

use tether_attach::{
    AnyKind, Compatibility, Grabbable, Kinded, MatchKind, PlugEvent, Positioned, Slot,
};
use tether_space::Vec3;
use tracing::trace;

use crate::events::{Recorder, TimelineEvent};
use crate::scenario::SlotSpec;

/// The simulated carried object.
#[derive(Debug, Default)]
pub struct SimGrabbable {
    releases: Cell<u32>,
}

impl SimGrabbable {
    /// How many times every holder was told to let go.
    pub fn releases(&self) -> u32 {
        self.releases.get()
    }
}

impl Grabbable for SimGrabbable {
    fn detach_from_all_grabbers(&self) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// A slot placed by the scenario. Highlight hooks go to the timeline.
#[derive(Debug)]
pub struct SimSlot {
    name: String,
    position: Vec3,
    kind: Option<String>,
    holding: Cell<bool>,
    recorder: Rc<Recorder>,
}

impl SimSlot {
    pub fn new(spec: &SlotSpec, recorder: Rc<Recorder>) -> Self {
        Self {
            name: spec.name.clone(),
            position: spec.position,
            kind: spec.kind.clone(),
            holding: Cell::new(false),
            recorder,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this slot currently holds the grabbable.
    pub fn is_holding(&self) -> bool {
        self.holding.get()
    }
}

impl Positioned for SimSlot {
    fn position(&self) -> Vec3 {
        self.position
    }
}

impl Kinded for SimSlot {
    type Kind = String;

    fn kind(&self) -> Option<&String> {
        self.kind.as_ref()
    }
}

impl Slot for SimSlot {
    type Grab = SimGrabbable;

    fn accept_grab(&self, _grabbable: &Rc<SimGrabbable>) {
        self.holding.set(true);
    }

    fn release_grab(&self, _grabbable: &Rc<SimGrabbable>) {
        self.holding.set(false);
    }

    fn attach_succeeded(&self, event: &PlugEvent<'_, Self>) {
        trace!(slot = %self.name, attachable = %event.attachable, "slot notified of attach");
    }

    fn highlight(&self) {
        let slot = self.name.clone();
        self.recorder.record(|frame| TimelineEvent::Highlighted { slot, frame });
    }

    fn unhighlight(&self) {
        let slot = self.name.clone();
        self.recorder.record(|frame| TimelineEvent::Unhighlighted { slot, frame });
    }
}

/// Kind rule chosen by the scenario at load time.
#[derive(Debug, Clone)]
pub enum ScenarioPolicy {
    Any(AnyKind),
    Match(MatchKind<String>),
}

impl ScenarioPolicy {
    pub fn from_kind(kind: Option<String>) -> Self {
        match kind {
            Some(kind) => ScenarioPolicy::Match(MatchKind::new(kind)),
            None => ScenarioPolicy::Any(AnyKind),
        }
    }
}

impl Compatibility<SimSlot> for ScenarioPolicy {
    fn kind_filter(&self) -> Option<&String> {
        match self {
            ScenarioPolicy::Any(any) => Compatibility::<SimSlot>::kind_filter(any),
            ScenarioPolicy::Match(matching) => Compatibility::<SimSlot>::kind_filter(matching),
        }
    }

    fn accepts(&self, slot: &SimSlot) -> bool {
        match self {
            ScenarioPolicy::Any(any) => any.accepts(slot),
            ScenarioPolicy::Match(matching) => matching.accepts(slot),
        }
    }
}
