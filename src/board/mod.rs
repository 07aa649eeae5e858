//! Board representation and game-state types.
//!
//! Contains squares, units and rosters, sieges, and the overall game state.

pub mod square;
pub mod state;
pub mod unit;

pub use square::{Square, SquareSet, BOARD_SIZE, SQUARE_COUNT};
pub use state::{GameState, GameStatus, Outcome, Siege, STARTING_MORALE, STARTING_SUPPLY};
pub use unit::{Decoy, Roster, Side, Unit, UnitKind, ALL_KINDS};
