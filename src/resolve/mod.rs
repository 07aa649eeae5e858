//! Action and turn resolution.
//!
//! Resolves player commits and repositions, advances sieges, and runs the
//! end-of-turn sequence with its win/loss evaluation.

pub mod combat;
pub mod reposition;
pub mod siege;
pub mod turn;

pub use combat::{commit, control_modifier, Commit, CommitOutcome, Rejection};
pub use reposition::{reposition, REPOSITION_COST};
pub use siege::advance_sieges;
pub use turn::{end_turn, evaluate, is_defeat, is_victory, replenish};
