//! Scenario execution with event recording.

use std::collections::HashMap;
use std::rc::Rc;

use tether_attach::{
    AttachableId, Attachable, Compatibility, SelectionChange, SlotDirectory, SlotResolver,
};
use tether_space::rank_by_distance;
use tracing::{debug, info};

use crate::error::{Result, SimError};
use crate::events::{Recorder, TimelineEvent};
use crate::scenario::{Scenario, Step};
use crate::world::{ScenarioPolicy, SimGrabbable, SimSlot};

/// The attachable type every scenario drives.
pub type SimAttachable = Attachable<String, SimSlot, ScenarioPolicy>;

/// Outcome of a scenario run.
#[derive(Debug, Clone)]
pub struct Report {
    pub events: Vec<TimelineEvent>,
    pub frames: u64,
    pub selected: Option<String>,
    pub plugged: Option<String>,
    /// Times the grabbable was released from all holders.
    pub releases: u32,
}

/// A scenario world: owned slots, the grabbable, and the attachable.
pub struct Simulation {
    slots: HashMap<String, Rc<SimSlot>>,
    directory: SlotDirectory<String, SimSlot>,
    grabbable: Rc<SimGrabbable>,
    attachable: SimAttachable,
    recorder: Rc<Recorder>,
}

impl Simulation {
    /// Build the world described by `scenario`. Steps are not run.
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let recorder = Rc::new(Recorder::default());
        let mut slots = HashMap::new();
        let mut directory = SlotDirectory::new();

        for spec in &scenario.slots {
            if slots.contains_key(&spec.name) {
                return Err(SimError::DuplicateSlot(spec.name.clone()));
            }
            let slot = Rc::new(SimSlot::new(spec, Rc::clone(&recorder)));
            directory.insert(spec.name.clone(), &slot);
            slots.insert(spec.name.clone(), slot);
        }

        let spec = &scenario.attachable;
        let grabbable = Rc::new(SimGrabbable::default());
        let mut attachable: SimAttachable = Attachable::new(
            AttachableId(spec.id),
            &grabbable,
            ScenarioPolicy::from_kind(spec.kind.clone()),
        )
        .with_config(spec.config)
        .with_position(spec.position);

        Self::observe(&mut attachable, &recorder);

        Ok(Self {
            slots,
            directory,
            grabbable,
            attachable,
            recorder,
        })
    }

    /// Build the world and run every step.
    pub fn run_scenario(scenario: &Scenario) -> Result<Report> {
        let mut sim = Self::new(scenario)?;
        sim.run(&scenario.steps)?;
        Ok(sim.report())
    }

    fn observe(attachable: &mut SimAttachable, recorder: &Rc<Recorder>) {
        let events = attachable.events();

        let log = Rc::clone(recorder);
        events.attempt.subscribe(move |event| {
            let slot = event.slot.name().to_owned();
            log.record(|frame| TimelineEvent::PlugAttempted { slot, frame });
        });

        let log = Rc::clone(recorder);
        events.success.subscribe(move |event| {
            let slot = event.slot.name().to_owned();
            log.record(|frame| TimelineEvent::Plugged { slot, frame });
        });

        let log = Rc::clone(recorder);
        events.fail.subscribe(move |event| {
            let slot = event.slot.name().to_owned();
            log.record(|frame| TimelineEvent::PlugFailed { slot, frame });
        });

        let log = Rc::clone(recorder);
        events.detached.subscribe(move |event| {
            let slot = event.slot.name().to_owned();
            log.record(|frame| TimelineEvent::Detached { slot, frame });
        });
    }

    /// Run steps in order, stopping at the first error.
    pub fn run(&mut self, steps: &[Step]) -> Result<()> {
        for step in steps {
            self.step(step)?;
        }
        info!(
            frames = self.recorder.frame(),
            events = self.recorder.len(),
            "scenario complete"
        );
        Ok(())
    }

    /// Apply a single step.
    pub fn step(&mut self, step: &Step) -> Result<()> {
        match step {
            Step::Move { to } => self.attachable.set_position(*to),
            Step::Enter { handle } => {
                if self.attachable.on_range_enter(handle.clone()) {
                    self.recorder.record(|frame| TimelineEvent::RangeEntered {
                        handle: handle.clone(),
                        frame,
                    });
                }
            }
            Step::Exit { handle } => {
                if self.attachable.on_range_exit(handle) {
                    self.recorder.record(|frame| TimelineEvent::RangeExited {
                        handle: handle.clone(),
                        frame,
                    });
                }
            }
            Step::Tick => self.tick(),
            Step::Plug { slot } => {
                let target = self
                    .slots
                    .get(slot)
                    .cloned()
                    .ok_or_else(|| SimError::UnknownSlot(slot.clone()))?;
                self.attachable.try_plug(Some(&target));
            }
            Step::PlugSelected => {
                let target = self.attachable.selected_slot();
                self.attachable.try_plug(target.as_ref());
            }
            Step::Detach => {
                self.attachable.try_detach();
            }
            Step::DropSlot { slot } => {
                let dropped = self
                    .slots
                    .remove(slot)
                    .ok_or_else(|| SimError::UnknownSlot(slot.clone()))?;
                drop(dropped);
                self.directory.prune();
                self.recorder.record(|frame| TimelineEvent::SlotDropped {
                    slot: slot.clone(),
                    frame,
                });
            }
        }
        Ok(())
    }

    fn tick(&mut self) {
        let change = self.attachable.recalculate(&self.directory);
        if change != SelectionChange::Unchanged {
            let selected = self.selected_name();
            debug!(?change, ?selected, ranking = ?self.ranking(), "selection changed");
            self.recorder
                .record(|frame| TimelineEvent::SelectionChanged { selected, frame });
        }
        self.recorder.advance();
    }

    /// In-range slots eligible for selection, nearest first.
    pub fn ranking(&self) -> Vec<(String, f32)> {
        let candidates = self
            .attachable
            .proximity()
            .iter()
            .filter_map(|handle| self.directory.resolve(handle));

        rank_by_distance(
            candidates,
            self.attachable.position(),
            self.attachable.policy().kind_filter(),
        )
        .into_iter()
        .map(|(distance, slot)| (slot.name().to_owned(), distance))
        .collect()
    }

    pub fn selected_name(&self) -> Option<String> {
        self.attachable.selected_slot().map(|s| s.name().to_owned())
    }

    pub fn plugged_name(&self) -> Option<String> {
        self.attachable.plugged_slot().map(|s| s.name().to_owned())
    }

    /// Look up a live slot by name.
    pub fn slot(&self, name: &str) -> Option<&Rc<SimSlot>> {
        self.slots.get(name)
    }

    pub fn attachable(&self) -> &SimAttachable {
        &self.attachable
    }

    pub fn report(&self) -> Report {
        Report {
            events: self.recorder.events(),
            frames: self.recorder.frame(),
            selected: self.selected_name(),
            plugged: self.plugged_name(),
            releases: self.grabbable.releases(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{AttachableSpec, SlotSpec};
    use tether_space::Vec3;

    fn slot(name: &str, x: f32, kind: Option<&str>) -> SlotSpec {
        SlotSpec {
            name: name.into(),
            position: Vec3::new(x, 0.0, 0.0),
            kind: kind.map(String::from),
        }
    }

    fn scenario(kind: Option<&str>, slots: Vec<SlotSpec>) -> Scenario {
        Scenario {
            attachable: AttachableSpec {
                kind: kind.map(String::from),
                ..AttachableSpec::default()
            },
            slots,
            steps: Vec::new(),
        }
    }

    fn enter(handle: &str) -> Step {
        Step::Enter {
            handle: handle.into(),
        }
    }

    #[test]
    fn simulation_starts_empty() {
        let sim = Simulation::new(&Scenario::default()).unwrap();
        let report = sim.report();
        assert!(report.events.is_empty());
        assert_eq!(report.frames, 0);
        assert!(report.selected.is_none());
        assert!(report.plugged.is_none());
    }

    #[test]
    fn duplicate_slots_are_rejected() {
        let world = scenario(None, vec![slot("a", 1.0, None), slot("a", 2.0, None)]);
        assert!(matches!(
            Simulation::new(&world),
            Err(SimError::DuplicateSlot(name)) if name == "a"
        ));
    }

    #[test]
    fn tick_selects_closest_and_records() {
        let world = scenario(Some("1"), vec![slot("a", 5.0, Some("1")), slot("b", 2.0, Some("1"))]);
        let mut sim = Simulation::new(&world).unwrap();

        sim.run(&[enter("a"), enter("b"), Step::Tick]).unwrap();

        assert_eq!(sim.selected_name().as_deref(), Some("b"));
        let events = sim.report().events;
        assert!(events.contains(&TimelineEvent::Highlighted {
            slot: "b".into(),
            frame: 0,
        }));
        assert!(events.contains(&TimelineEvent::SelectionChanged {
            selected: Some("b".into()),
            frame: 0,
        }));
    }

    #[test]
    fn ranking_respects_kind() {
        let world = scenario(
            Some("usb"),
            vec![
                slot("near", 1.0, Some("hdmi")),
                slot("mid", 3.0, Some("usb")),
                slot("far", 6.0, Some("usb")),
            ],
        );
        let mut sim = Simulation::new(&world).unwrap();
        sim.run(&[enter("near"), enter("mid"), enter("far")]).unwrap();

        let names: Vec<_> = sim.ranking().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["mid", "far"]);
    }

    #[test]
    fn plug_selected_then_detach() {
        let world = scenario(None, vec![slot("a", 1.0, None)]);
        let mut sim = Simulation::new(&world).unwrap();

        sim.run(&[enter("a"), Step::Tick, Step::PlugSelected]).unwrap();
        assert_eq!(sim.plugged_name().as_deref(), Some("a"));
        assert!(sim.slot("a").unwrap().is_holding());

        sim.step(&Step::Detach).unwrap();
        assert!(sim.plugged_name().is_none());
        assert!(!sim.slot("a").unwrap().is_holding());
        assert_eq!(sim.report().releases, 2);
    }

    #[test]
    fn plug_selected_with_nothing_selected_is_silent() {
        let mut sim = Simulation::new(&scenario(None, vec![])).unwrap();
        sim.step(&Step::PlugSelected).unwrap();
        assert!(sim.report().events.is_empty());
    }

    #[test]
    fn unknown_slot_is_an_error() {
        let mut sim = Simulation::new(&scenario(None, vec![])).unwrap();
        let ghost = Step::Plug {
            slot: "ghost".into(),
        };
        let err = sim.step(&ghost).unwrap_err();
        assert!(matches!(err, SimError::UnknownSlot(name) if name == "ghost"));
    }

    #[test]
    fn dropping_selected_slot_clears_it() {
        let world = scenario(None, vec![slot("a", 1.0, None)]);
        let mut sim = Simulation::new(&world).unwrap();

        sim.run(&[enter("a"), Step::Tick]).unwrap();
        sim.step(&Step::DropSlot { slot: "a".into() }).unwrap();

        assert!(sim.selected_name().is_none());
        assert!(sim.slot("a").is_none());
        assert!(sim.step(&Step::DropSlot { slot: "a".into() }).is_err());
    }
}
