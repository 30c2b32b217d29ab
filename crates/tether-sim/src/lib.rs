//! Tether Simulation
//!
//! Runs scripted attach scenarios headlessly and records what happened.
//!
//! # Architecture
//!
//! - **Scenario**: JSON description of slots, the attachable, and steps
//! - **World**: simulated slots and grabbable implementing the host traits
//! - **Simulation**: drives the attachable step by step
//! - **Timeline**: every range event, selection change, highlight and plug
//!   notification, stamped with the frame it happened on
//!
//! # Usage
//!
//! ```
//! use tether_sim::{Scenario, Simulation};
//!
//! let scenario = Scenario::from_json(r#"{
//!     "slots": [{ "name": "dock", "position": [1.0, 0.0, 0.0] }],
//!     "steps": [
//!         { "op": "enter", "handle": "dock" },
//!         { "op": "tick" },
//!         { "op": "plug_selected" }
//!     ]
//! }"#).unwrap();
//!
//! let report = Simulation::run_scenario(&scenario).unwrap();
//! assert_eq!(report.plugged.as_deref(), Some("dock"));
//! ```

mod error;
mod events;
mod scenario;
mod simulation;
mod world;

pub use error::{Result, SimError};
pub use events::{Recorder, TimelineEvent};
pub use scenario::{AttachableSpec, Scenario, SlotSpec, Step};
pub use simulation::{Report, SimAttachable, Simulation};
pub use world::{ScenarioPolicy, SimGrabbable, SimSlot};
