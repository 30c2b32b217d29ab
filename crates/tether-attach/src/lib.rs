//! Tether Attach
//!
//! Attach/detach state machine for an object that plugs into nearby slots.
//!
//! # States
//!
//! An [`Attachable`] is `Idle`, has a `Selected` candidate, or is `Plugged`
//! into a slot. Range events from the host feed its proximity set; each tick
//! [`Attachable::recalculate`] selects the closest compatible slot; callers
//! plug and detach explicitly.
//!
//! # Plug Ordering
//!
//! A plug into a slot always notifies in this order:
//!
//! 1. attempt
//! 2. on acceptance: clear selection, detach the previous slot, release the
//!    grabbable from its holders, hand it to the slot, success, slot sink
//! 3. on rejection: fail
//!
//! # Compatibility
//!
//! The kind rule is a policy type parameter: [`AnyKind`] accepts everything,
//! [`MatchKind`] restricts selection and plugging to slots of an equal kind.
//!
//! # Ownership
//!
//! Slots and the grabbable belong to the host. The attachable keeps only
//! `Weak` references and treats a dropped slot as absent.

mod attachable;
mod capability;
mod compat;
mod config;
mod error;
mod notifier;
mod resolver;

pub use attachable::{AttachState, Attachable, SelectionChange};
pub use capability::{AttachableId, Grabbable, PlugEvent, Slot};
pub use compat::{AnyKind, Compatibility, MatchKind};
pub use config::AttachConfig;
pub use error::{DetachError, DetachResult, PlugError, PlugResult};
pub use notifier::{Channel, EventNotifier, ObserverId};
pub use resolver::{SlotDirectory, SlotResolver};

pub use tether_space::{Kinded, Positioned, ProximitySet, Vec3};
