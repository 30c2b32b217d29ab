//! Timeline events recorded while a scenario runs.

use std::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};

/// Events that occur during a scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimelineEvent {
    /// A handle entered the trigger range
    RangeEntered { handle: String, frame: u64 },

    /// A handle left the trigger range
    RangeExited { handle: String, frame: u64 },

    /// Recalculation changed the selection
    SelectionChanged { selected: Option<String>, frame: u64 },

    /// A slot's highlight hook ran
    Highlighted { slot: String, frame: u64 },

    /// A slot's unhighlight hook ran
    Unhighlighted { slot: String, frame: u64 },

    /// A plug was attempted
    PlugAttempted { slot: String, frame: u64 },

    /// A plug attached
    Plugged { slot: String, frame: u64 },

    /// A plug was rejected
    PlugFailed { slot: String, frame: u64 },

    /// The attachable let go of a slot
    Detached { slot: String, frame: u64 },

    /// The host destroyed a slot
    SlotDropped { slot: String, frame: u64 },
}

impl TimelineEvent {
    /// Get the frame number for this event.
    pub fn frame(&self) -> u64 {
        match self {
            TimelineEvent::RangeEntered { frame, .. } => *frame,
            TimelineEvent::RangeExited { frame, .. } => *frame,
            TimelineEvent::SelectionChanged { frame, .. } => *frame,
            TimelineEvent::Highlighted { frame, .. } => *frame,
            TimelineEvent::Unhighlighted { frame, .. } => *frame,
            TimelineEvent::PlugAttempted { frame, .. } => *frame,
            TimelineEvent::Plugged { frame, .. } => *frame,
            TimelineEvent::PlugFailed { frame, .. } => *frame,
            TimelineEvent::Detached { frame, .. } => *frame,
            TimelineEvent::SlotDropped { frame, .. } => *frame,
        }
    }
}

/// Shared, append-only event log stamped with the current frame.
///
/// Slots and notification observers hold an `Rc` to the same recorder.
#[derive(Debug, Default)]
pub struct Recorder {
    frame: Cell<u64>,
    events: RefCell<Vec<TimelineEvent>>,
}

impl Recorder {
    pub fn frame(&self) -> u64 {
        self.frame.get()
    }

    pub(crate) fn advance(&self) {
        self.frame.set(self.frame.get() + 1);
    }

    /// Append the event built for the current frame.
    pub fn record(&self, build: impl FnOnce(u64) -> TimelineEvent) {
        let event = build(self.frame.get());
        self.events.borrow_mut().push(event);
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<TimelineEvent> {
        self.events.borrow().clone()
    }
}
