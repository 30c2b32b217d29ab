//! Synchronous plug notifications.
//!
//! Each channel keeps its observers in registration order and calls them
//! inline. Emitting on a channel with no observers does nothing.

use tracing::trace;

use crate::capability::PlugEvent;

/// Handle returned by [`Channel::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer<S> = Box<dyn FnMut(&PlugEvent<'_, S>)>;

/// One notification channel.
pub struct Channel<S> {
    name: &'static str,
    next_id: u64,
    observers: Vec<(ObserverId, Observer<S>)>,
}

impl<S> Channel<S> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: 0,
            observers: Vec::new(),
        }
    }

    /// Register an observer. It runs after every observer registered before it.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&PlugEvent<'_, S>) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub(crate) fn emit(&mut self, event: &PlugEvent<'_, S>) {
        trace!(
            channel = self.name,
            attachable = %event.attachable,
            observers = self.observers.len(),
            "emit"
        );
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }
}

impl<S> std::fmt::Debug for Channel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// The attach notification channels of one attachable.
#[derive(Debug)]
pub struct EventNotifier<S> {
    /// Fired first on every plug attempt with a slot.
    pub attempt: Channel<S>,
    /// Fired after a plug attached.
    pub success: Channel<S>,
    /// Fired after a plug was rejected.
    pub fail: Channel<S>,
    /// Fired after a plugged slot was released.
    pub detached: Channel<S>,
}

impl<S> Default for EventNotifier<S> {
    fn default() -> Self {
        Self {
            attempt: Channel::new("attempt"),
            success: Channel::new("success"),
            fail: Channel::new("fail"),
            detached: Channel::new("detached"),
        }
    }
}
