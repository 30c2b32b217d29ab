//! The attach state machine.
//!
//! ```text
//!            recalculate                try_plug
//!   Idle  ───────────────▶ Selected ─────────────▶ Plugged
//!    ▲  ◀───────────────     │                       │
//!    │    empty / no match   │ try_plug              │ try_detach
//!    │                       ▼                       │
//!    └──────────────────── (any) ◀───────────────────┘
//! ```
//!
//! Selection and plug are tracked separately but never coexist: plugging
//! clears the selection, and recalculation while plugged keeps it clear.
//!
//! Slots are held through `Weak` references. A slot dropped by its owner is
//! treated as absent, never dereferenced.

use std::hash::Hash;
use std::rc::{Rc, Weak};

use tether_space::{find_closest, ProximitySet, Vec3};
use tracing::{debug, trace, warn};

use crate::capability::{AttachableId, Grabbable, PlugEvent, Slot};
use crate::compat::{AnyKind, Compatibility};
use crate::config::AttachConfig;
use crate::error::{DetachError, DetachResult, PlugError, PlugResult};
use crate::notifier::EventNotifier;
use crate::resolver::SlotResolver;

/// Observable state of an attachable.
#[derive(Debug)]
pub enum AttachState<S> {
    /// Nothing selected, nothing plugged.
    Idle,
    /// A candidate is selected as the plug target.
    Selected(Rc<S>),
    /// Plugged into a slot.
    Plugged(Rc<S>),
}

impl<S> AttachState<S> {
    pub fn is_idle(&self) -> bool {
        matches!(self, AttachState::Idle)
    }
}

/// What a recalculation did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Selection is the same as before.
    Unchanged,
    /// A candidate became selected where there was none.
    Selected,
    /// The selection moved to a different candidate.
    Switched,
    /// The previous selection was dropped.
    Cleared,
}

/// A movable object that plugs into nearby slots.
///
/// `H` is the host's opaque handle for objects in range, `S` the slot type,
/// and `P` the compatibility policy.
pub struct Attachable<H: Hash + Eq, S: Slot, P = AnyKind> {
    id: AttachableId,
    position: Vec3,
    proximity: ProximitySet<H>,
    selected: Option<Weak<S>>,
    plugged: Option<Weak<S>>,
    grabbable: Weak<S::Grab>,
    policy: P,
    events: EventNotifier<S>,
    config: AttachConfig,
}

impl<H, S, P> Attachable<H, S, P>
where
    H: Hash + Eq,
    S: Slot,
    P: Compatibility<S>,
{
    /// Create an idle attachable that carries `grabbable`.
    pub fn new(id: AttachableId, grabbable: &Rc<S::Grab>, policy: P) -> Self {
        Self {
            id,
            position: Vec3::ZERO,
            proximity: ProximitySet::new(),
            selected: None,
            plugged: None,
            grabbable: Rc::downgrade(grabbable),
            policy,
            events: EventNotifier::default(),
            config: AttachConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AttachConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> AttachableId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn config(&self) -> &AttachConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn proximity(&self) -> &ProximitySet<H> {
        &self.proximity
    }

    /// Notification channels, for subscribing observers.
    pub fn events(&mut self) -> &mut EventNotifier<S> {
        &mut self.events
    }

    /// Host trigger callback: `handle` entered range.
    pub fn on_range_enter(&mut self, handle: H) -> bool {
        let added = self.proximity.register(handle);
        trace!(attachable = %self.id, added, in_range = self.proximity.len(), "range enter");
        added
    }

    /// Host trigger callback: `handle` left range.
    pub fn on_range_exit(&mut self, handle: &H) -> bool {
        let removed = self.proximity.unregister(handle);
        trace!(attachable = %self.id, removed, in_range = self.proximity.len(), "range exit");
        removed
    }

    /// The selected candidate, if it still exists.
    pub fn selected_slot(&self) -> Option<Rc<S>> {
        self.selected.as_ref().and_then(Weak::upgrade)
    }

    /// The plugged slot, if it still exists.
    pub fn plugged_slot(&self) -> Option<Rc<S>> {
        self.plugged.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_plugged_in(&self) -> bool {
        self.plugged_slot().is_some()
    }

    pub fn state(&self) -> AttachState<S> {
        if let Some(slot) = self.plugged_slot() {
            AttachState::Plugged(slot)
        } else if let Some(slot) = self.selected_slot() {
            AttachState::Selected(slot)
        } else {
            AttachState::Idle
        }
    }

    /// Per-tick hook: move to `position`, then recalculate.
    pub fn tick<R>(&mut self, position: Vec3, resolver: &R) -> SelectionChange
    where
        R: SlotResolver<H, S>,
    {
        self.position = position;
        self.recalculate(resolver)
    }

    /// Re-pick the selected candidate from what is in range.
    pub fn recalculate<R>(&mut self, resolver: &R) -> SelectionChange
    where
        R: SlotResolver<H, S>,
    {
        self.prune_dropped_plug();

        if self.proximity.is_empty() || self.plugged.is_some() {
            return if self.deselect() {
                SelectionChange::Cleared
            } else {
                SelectionChange::Unchanged
            };
        }

        let candidates = self.proximity.iter().filter_map(|handle| resolver.resolve(handle));
        let closest = find_closest(candidates, self.position, self.policy.kind_filter());

        match (self.selected_slot(), closest) {
            (Some(current), Some(closest)) if Rc::ptr_eq(&current, &closest) => {
                SelectionChange::Unchanged
            }
            (Some(_), Some(closest)) => {
                self.deselect();
                self.select(&closest);
                SelectionChange::Switched
            }
            (None, Some(closest)) => {
                self.select(&closest);
                SelectionChange::Selected
            }
            (Some(_), None) => {
                self.deselect();
                SelectionChange::Cleared
            }
            (None, None) => {
                self.selected = None;
                SelectionChange::Unchanged
            }
        }
    }

    /// Plug into `slot`, reporting why it failed.
    ///
    /// `None` fails with [`PlugError::NoSlot`] before any notification.
    /// Otherwise the attempt channel fires first, then either success (and
    /// the slot's own sink) or fail.
    pub fn plug(&mut self, slot: Option<&Rc<S>>) -> PlugResult {
        let slot = slot.ok_or(PlugError::NoSlot)?;

        self.events.attempt.emit(&PlugEvent::new(self.id, slot));

        if !self.policy.accepts(&**slot) {
            debug!(attachable = %self.id, "plug rejected: incompatible kind");
            self.events.fail.emit(&PlugEvent::new(self.id, slot));
            return Err(PlugError::KindMismatch);
        }

        self.attach(slot);
        Ok(())
    }

    /// Plug into `slot`. Returns `true` if it attached.
    pub fn try_plug(&mut self, slot: Option<&Rc<S>>) -> bool {
        self.plug(slot).is_ok()
    }

    /// Unplug, returning the slot that was released.
    pub fn detach(&mut self) -> DetachResult<Rc<S>> {
        let plugged = self.plugged.take().ok_or(DetachError::NotPlugged)?;

        let grabbable = self.grabbable.upgrade();
        match &grabbable {
            Some(grabbable) => grabbable.detach_from_all_grabbers(),
            None => warn!(attachable = %self.id, "grabbable dropped while plugged"),
        }

        let Some(slot) = plugged.upgrade() else {
            warn!(attachable = %self.id, "plugged slot dropped before detach");
            return Err(DetachError::SlotGone);
        };

        if let Some(grabbable) = &grabbable {
            slot.release_grab(grabbable);
        }

        debug!(attachable = %self.id, "detached");
        self.events.detached.emit(&PlugEvent::new(self.id, &slot));
        Ok(slot)
    }

    /// Unplug. Returns `false` if nothing was plugged.
    pub fn try_detach(&mut self) -> bool {
        self.detach().is_ok()
    }

    fn attach(&mut self, slot: &Rc<S>) {
        self.deselect();

        if self.config.detach_before_attach && self.plugged.is_some() {
            // Releasing a dropped slot still frees the grabbable
            let _ = self.detach();
        }

        match self.grabbable.upgrade() {
            Some(grabbable) => {
                grabbable.detach_from_all_grabbers();
                slot.accept_grab(&grabbable);
            }
            None => warn!(attachable = %self.id, "grabbable dropped; slot receives no grab"),
        }

        self.plugged = Some(Rc::downgrade(slot));
        debug!(attachable = %self.id, "plugged");

        let event = PlugEvent::new(self.id, slot);
        self.events.success.emit(&event);
        slot.attach_succeeded(&event);
    }

    fn select(&mut self, slot: &Rc<S>) {
        if self.config.highlight {
            slot.highlight();
        }
        self.selected = Some(Rc::downgrade(slot));
        debug!(attachable = %self.id, "slot selected");
    }

    /// Clear the selection. Returns `true` if a live slot was deselected.
    fn deselect(&mut self) -> bool {
        let Some(slot) = self.selected.take().and_then(|weak| weak.upgrade()) else {
            return false;
        };
        if self.config.highlight {
            slot.unhighlight();
        }
        debug!(attachable = %self.id, "slot deselected");
        true
    }

    fn prune_dropped_plug(&mut self) {
        if self.plugged.as_ref().is_some_and(|weak| weak.strong_count() == 0) {
            warn!(attachable = %self.id, "plugged slot was dropped; releasing");
            let _ = self.detach();
        }
    }
}

impl<H, S, P> std::fmt::Debug for Attachable<H, S, P>
where
    H: Hash + Eq + std::fmt::Debug,
    S: Slot,
    P: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachable")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("proximity", &self.proximity)
            .field("selected", &self.selected.is_some())
            .field("plugged", &self.plugged.is_some())
            .field("policy", &self.policy)
            .field("config", &self.config)
            .finish()
    }
}
