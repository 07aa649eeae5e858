//! Influence and visibility.
//!
//! Derives each unit's zone of control, aggregates it into a per-square
//! tally, and gates vision on that tally.

pub mod influence;
pub mod visibility;

pub use influence::{compute_influence, zone_of_control, Control, ControlStatus, InfluenceMap};
pub use visibility::{is_visible, visibility_mask, visible_under};
