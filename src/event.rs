//! Gameplay log events.
//!
//! Every notable state change produces an `Event`. The `Display` form is the
//! free-text line shown to the player.

use std::fmt;

use crate::board::{Outcome, Square, UnitKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SiegeInitiated(Square),
    SiegeContinues(Square),
    SiegeUpkeep(Square),
    SiegeCaptured(Square),
    SiegeAbandoned(Square),
    SiegeDisrupted(Square),
    AttackFailed(Square),
    AttackBlind(Square),
    UnitDestroyed { square: Square, kind: UnitKind },
    IntelGathered,
    DecoyPlaced(Square),
    KingPressured { morale_lost: i32 },
    EnemyAdvanced { from: Square, to: Square },
    EnemyHarassment,
    RepositionMode,
    UnitSelected(Square),
    Repositioned { from: Square, to: Square },
    GameSaved,
    GameLoaded,
    GameOver(Outcome),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SiegeInitiated(sq) => write!(f, "Siege initiated at {}.", sq),
            Event::SiegeContinues(sq) => write!(f, "Siege at {} already underway.", sq),
            Event::SiegeUpkeep(sq) => {
                write!(f, "Siege at {} continues (-1 Morale, -1 Supply).", sq)
            }
            Event::SiegeCaptured(sq) => write!(f, "Siege at {} successful (+1 Morale).", sq),
            Event::SiegeAbandoned(sq) => write!(f, "Siege at {} lifted: the square is empty.", sq),
            Event::SiegeDisrupted(sq) => write!(f, "Enemy disrupts the siege at {}.", sq),
            Event::AttackFailed(sq) => write!(f, "Attack on {} failed (-1 Morale).", sq),
            Event::AttackBlind(sq) => {
                write!(f, "Attack on {} failed: no line of sight (-1 Morale).", sq)
            }
            Event::UnitDestroyed { square, kind } => {
                write!(f, "Enemy {} at {} destroyed (+1 Morale).", kind.name(), square)
            }
            Event::IntelGathered => write!(f, "Intel gathered."),
            Event::DecoyPlaced(sq) => write!(f, "Decoy deployed at {}.", sq),
            Event::KingPressured { morale_lost } => {
                write!(f, "Enemy pressures your King (-{} Morale).", morale_lost)
            }
            Event::EnemyAdvanced { from, to } => {
                write!(f, "Enemy repositions from {} to {} to expand control.", from, to)
            }
            Event::EnemyHarassment => write!(f, "Enemy raids your lines (-1 Morale)."),
            Event::RepositionMode => write!(f, "Reposition mode active."),
            Event::UnitSelected(sq) => write!(f, "Piece at {} selected for reposition.", sq),
            Event::Repositioned { from, to } => {
                write!(f, "Piece repositioned from {} to {} (-2 Supply).", from, to)
            }
            Event::GameSaved => write!(f, "Game saved."),
            Event::GameLoaded => write!(f, "Game loaded."),
            Event::GameOver(outcome) => write!(f, "{}", outcome.banner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_name_the_square() {
        let sq = Square::new(2, 5).unwrap();
        assert_eq!(Event::SiegeInitiated(sq).to_string(), "Siege initiated at 2,5.");
        assert_eq!(
            Event::UnitDestroyed { square: sq, kind: UnitKind::Rook }.to_string(),
            "Enemy rook at 2,5 destroyed (+1 Morale)."
        );
    }

    #[test]
    fn game_over_uses_banner() {
        assert_eq!(Event::GameOver(Outcome::Victory).to_string(), Outcome::Victory.banner());
    }
}
