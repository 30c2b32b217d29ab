//! Error types for tether-attach.
//!
//! These are expected outcomes, not faults. The boolean entry points
//! (`try_plug`, `try_detach`) collapse them to `false`.

use thiserror::Error;

/// Result type for plug operations.
pub type PlugResult<T = ()> = std::result::Result<T, PlugError>;

/// Result type for detach operations.
pub type DetachResult<T> = std::result::Result<T, DetachError>;

/// Why a plug attempt did not attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlugError {
    /// No slot was offered.
    #[error("no slot to plug into")]
    NoSlot,

    /// The compatibility policy rejected the slot.
    #[error("slot kind is not compatible with this attachable")]
    KindMismatch,
}

/// Why a detach did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DetachError {
    /// Nothing is plugged in.
    #[error("attachable is not plugged in")]
    NotPlugged,

    /// The plugged slot was dropped by its owner before detach.
    #[error("plugged slot no longer exists")]
    SlotGone,
}
