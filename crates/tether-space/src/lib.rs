//! Tether Space
//!
//! Spatial half of the attach system: which candidates are in range, and
//! which of them is the best target.
//!
//! # Proximity
//!
//! The host engine owns trigger-volume detection. It reports range enter/exit
//! events, and [`ProximitySet`] mirrors them exactly: registering twice is the
//! same as registering once, and unregistering a stranger does nothing.
//!
//! # Selection
//!
//! [`find_closest`] picks the candidate nearest to an origin by Euclidean
//! distance, optionally restricted to an equal kind tag. Ties go to the first
//! candidate in enumeration order, which for a [`ProximitySet`] is insertion
//! order.

mod capability;
mod proximity;
mod selector;

pub use capability::{Kinded, Positioned};
pub use proximity::ProximitySet;
pub use selector::{find_closest, passes_filter, rank_by_distance};

pub use glam::Vec3;
