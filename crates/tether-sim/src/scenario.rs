//! Scenario files: the world layout and the script to run against it.
//!
//! ```json
//! {
//!   "attachable": { "id": 1, "kind": "usb", "position": [0, 0, 0] },
//!   "slots": [{ "name": "port-a", "position": [2, 0, 0], "kind": "usb" }],
//!   "steps": [{ "op": "enter", "handle": "port-a" }, { "op": "tick" }]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tether_attach::AttachConfig;
use tether_space::Vec3;

use crate::error::Result;

/// The attachable under test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachableSpec {
    #[serde(default)]
    pub id: u64,
    /// When present, only slots of this kind are selectable and pluggable.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub config: AttachConfig,
}

/// A slot placed in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSpec {
    pub name: String,
    pub position: Vec3,
    #[serde(default)]
    pub kind: Option<String>,
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Move the attachable without recalculating.
    Move { to: Vec3 },
    /// A handle entered the trigger range. Handles that name no slot are
    /// valid and simply never selected.
    Enter { handle: String },
    /// A handle left the trigger range.
    Exit { handle: String },
    /// Recalculate the selection and advance one frame.
    Tick,
    /// Plug into a named slot.
    Plug { slot: String },
    /// Plug into whatever is selected, possibly nothing.
    PlugSelected,
    /// Detach from the plugged slot.
    Detach,
    /// The host destroys a slot.
    DropSlot { slot: String },
}

/// A complete scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub attachable: AttachableSpec,
    #[serde(default)]
    pub slots: Vec<SlotSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
