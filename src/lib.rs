//! Line War engine library.
//!
//! Exposes the board representation, influence and visibility, action and
//! turn resolution, the scripted opponent, and the text protocol for use by
//! integration tests and the binaries.

pub mod board;
pub mod control;
pub mod engine;
pub mod event;
pub mod opponent;
pub mod protocol;
pub mod resolve;
pub mod rules;
pub mod simulate;
