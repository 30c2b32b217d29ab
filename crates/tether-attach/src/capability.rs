//! Capabilities consumed from the host: slots and the grabbable.
//!
//! The host engine implements these on its own objects. Only `accept_grab`
//! is mandatory on a slot; releasing, highlighting and the attach-success
//! sink default to no-ops so headless hosts can ignore them.
//!
//! Methods take `&self`: slots and grabbables are shared through `Rc`, so
//! implementations that record state use interior mutability.

use std::fmt;
use std::rc::Rc;

use tether_space::{Kinded, Positioned};

/// Identifier of an attachable, carried in every notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttachableId(pub u64);

impl fmt::Display for AttachableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attachable#{}", self.0)
    }
}

/// The carried object. Only one holder may own it at a time.
pub trait Grabbable {
    /// Release the object from every hand or slot currently holding it.
    fn detach_from_all_grabbers(&self);
}

/// A receptacle an attachable can plug into.
pub trait Slot: Positioned + Kinded {
    /// The grabbable type this slot can hold.
    type Grab: Grabbable + ?Sized;

    /// Take ownership of `grabbable`.
    fn accept_grab(&self, grabbable: &Rc<Self::Grab>);

    /// Let go of `grabbable` on detach.
    fn release_grab(&self, _grabbable: &Rc<Self::Grab>) {}

    /// Attach-success sink, called after the attachable's own success
    /// observers with the same event.
    fn attach_succeeded(&self, _event: &PlugEvent<'_, Self>) {}

    /// Became the attachable's selected candidate.
    fn highlight(&self) {}

    /// Stopped being the selected candidate.
    fn unhighlight(&self) {}
}

/// Payload of every attach notification: who, and which slot.
pub struct PlugEvent<'a, S: ?Sized> {
    pub attachable: AttachableId,
    pub slot: &'a Rc<S>,
}

impl<'a, S: ?Sized> PlugEvent<'a, S> {
    pub fn new(attachable: AttachableId, slot: &'a Rc<S>) -> Self {
        Self { attachable, slot }
    }
}

impl<S: ?Sized> Clone for PlugEvent<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for PlugEvent<'_, S> {}

impl<S: ?Sized> fmt::Debug for PlugEvent<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlugEvent")
            .field("attachable", &self.attachable)
            .field("slot", &Rc::as_ptr(self.slot))
            .finish()
    }
}
