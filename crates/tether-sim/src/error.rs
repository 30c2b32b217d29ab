//! Error types for tether-sim.

use thiserror::Error;

/// Result type for tether-sim operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while loading or running a scenario.
#[derive(Debug, Error)]
pub enum SimError {
    /// The scenario file could not be read.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    /// The scenario is not valid JSON for the scenario schema.
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),

    /// A step names a slot the scenario never declared (or already dropped).
    #[error("unknown slot: {0}")]
    UnknownSlot(String),

    /// Two slots share a name.
    #[error("duplicate slot name: {0}")]
    DuplicateSlot(String),
}
