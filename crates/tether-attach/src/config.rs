//! Attachable behaviour switches.

/// Configuration for an [`Attachable`](crate::Attachable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttachConfig {
    /// Fully detach from the current slot before plugging into another.
    ///
    /// When off, a second plug overwrites the plugged slot without telling
    /// the old slot to release the grab.
    pub detach_before_attach: bool,
    /// Drive the slot highlight hooks from selection changes.
    pub highlight: bool,
}

impl Default for AttachConfig {
    fn default() -> Self {
        Self {
            detach_before_attach: true,
            highlight: true,
        }
    }
}

impl AttachConfig {
    /// Configuration for hosts without visuals.
    pub fn headless() -> Self {
        Self {
            highlight: false,
            ..Self::default()
        }
    }
}
