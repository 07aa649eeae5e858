//! Game state representation.
//!
//! Holds the single aggregate every operation reads and mutates: both
//! rosters, decoys, active sieges, the shared resources, and whether the
//! game has ended.

use std::collections::BTreeMap;

use super::square::Square;
use super::unit::{Decoy, Roster, Side, Unit, UnitKind};

/// Starting supply for a new game.
pub const STARTING_SUPPLY: i32 = 20;

/// Starting morale for a new game.
pub const STARTING_MORALE: i32 = 10;

/// An active siege on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Siege {
    /// Starts at 1 and grows by one per end of turn.
    pub stage: u8,
    pub attacker: Side,
}

impl Siege {
    /// A freshly started siege.
    pub const fn started_by(attacker: Side) -> Self {
        Siege { stage: 1, attacker }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    /// End-of-game banner text.
    pub const fn banner(self) -> &'static str {
        match self {
            Outcome::Victory => "YOU WIN - ENEMY COLLAPSED",
            Outcome::Defeat => "YOU LOSE - YOUR FORCES COLLAPSED",
        }
    }
}

/// Lifecycle of a game. `Over` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Active,
    Over(Outcome),
}

/// Complete game state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub player: Roster,
    pub enemy: Roster,
    pub decoys: Vec<Decoy>,
    pub sieges: BTreeMap<Square, Siege>,
    pub supply: i32,
    /// May dip to zero or below before the loss check runs.
    pub morale: i32,
    pub fatigue: u32,
    pub intel: u32,
    pub turn: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Creates a state with empty rosters and starting resources.
    pub fn empty() -> Self {
        GameState {
            player: Roster::new(Side::Player),
            enemy: Roster::new(Side::Enemy),
            decoys: Vec::new(),
            sieges: BTreeMap::new(),
            supply: STARTING_SUPPLY,
            morale: STARTING_MORALE,
            fatigue: 0,
            intel: 0,
            turn: 1,
            status: GameStatus::Active,
        }
    }

    /// Creates the standard opening position.
    pub fn initial() -> Self {
        let mut state = GameState::empty();
        for (kind, row, col) in [
            (UnitKind::Rook, 7, 0),
            (UnitKind::Bishop, 7, 2),
            (UnitKind::Queen, 6, 3),
            (UnitKind::Pawn, 6, 4),
            (UnitKind::King, 7, 4),
            (UnitKind::Knight, 7, 5),
        ] {
            state.place_unit(Side::Player, kind, row, col);
        }
        for (kind, row, col) in [
            (UnitKind::King, 0, 4),
            (UnitKind::Queen, 1, 4),
            (UnitKind::Rook, 0, 7),
            (UnitKind::Bishop, 0, 2),
            (UnitKind::Knight, 0, 1),
            (UnitKind::Pawn, 1, 3),
        ] {
            state.place_unit(Side::Enemy, kind, row, col);
        }
        state
    }

    /// Places a unit for a side. Returns false if the square is off the board.
    pub fn place_unit(&mut self, side: Side, kind: UnitKind, row: u8, col: u8) -> bool {
        match Square::new(row, col) {
            Some(sq) => {
                self.roster_mut(side).push(Unit::new(kind, sq));
                true
            }
            None => false,
        }
    }

    pub fn roster(&self, side: Side) -> &Roster {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    /// Returns the decoy on a square, if any.
    pub fn decoy_at(&self, sq: Square) -> Option<&Decoy> {
        self.decoys.iter().find(|d| d.square == sq)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::initial()
    }
}
