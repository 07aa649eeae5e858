//! Save-game encoding and decoding.
//!
//! A save is a single JSON object:
//!
//! ```text
//! { "supply": 18, "morale": 9, "intel": 0, "fatigue": 1, "turn": 3,
//!   "playerPieces": [{"type": "rook", "row": 7, "col": 0}, ...],
//!   "enemyPieces":  [...],
//!   "fakeEnemyUnits": [{"row": 2, "col": 2}],
//!   "sieges": {"1,4": {"stage": 2, "attacker": "player"}} }
//! ```
//!
//! `intel`, `fakeEnemyUnits` and `sieges` may be omitted. There is no
//! version field. Decoding either yields a complete state or fails.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Decoy, GameState, GameStatus, Roster, Side, Siege, Square, Unit, UnitKind};
use crate::rules::Rules;

/// Largest magnitude accepted for supply, morale and fatigue.
const RESOURCE_LIMIT: i64 = 1_000;

/// Largest turn number accepted.
const TURN_LIMIT: i64 = 1_000_000;

/// Sieges resolve on reaching this stage, so no stored siege can exceed it.
const MAX_SIEGE_STAGE: u8 = Rules::fog().capture_stage;

/// Largest intel a game can hold.
const MAX_INTEL: u32 = Rules::fog().intel_cap;

/// Errors that can occur while reading or writing a save.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("malformed save: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("unknown unit type: '{0}'")]
    UnknownKind(String),

    #[error("unknown side: '{0}'")]
    UnknownSide(String),

    #[error("square off the board: {0},{1}")]
    OffBoard(i64, i64),

    #[error("invalid siege key: '{0}'")]
    InvalidSiegeKey(String),

    #[error("invalid siege stage {stage} at {square}")]
    InvalidStage { square: String, stage: u8 },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

/// Wire form of the game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGame {
    pub supply: i32,
    pub morale: i32,
    #[serde(default)]
    pub intel: u32,
    pub fatigue: u32,
    pub turn: u32,
    pub player_pieces: Vec<SavedPiece>,
    pub enemy_pieces: Vec<SavedPiece>,
    #[serde(default)]
    pub fake_enemy_units: Vec<SavedDecoy>,
    #[serde(default)]
    pub sieges: BTreeMap<String, SavedSiege>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPiece {
    #[serde(rename = "type")]
    pub kind: String,
    pub row: i64,
    pub col: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDecoy {
    pub row: i64,
    pub col: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSiege {
    pub stage: u8,
    #[serde(default = "default_attacker")]
    pub attacker: String,
}

fn default_attacker() -> String {
    Side::Player.name().to_string()
}

fn square_from(row: i64, col: i64) -> Result<Square, SaveError> {
    let (Ok(r), Ok(c)) = (u8::try_from(row), u8::try_from(col)) else {
        return Err(SaveError::OffBoard(row, col));
    };
    Square::new(r, c).ok_or(SaveError::OffBoard(row, col))
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), SaveError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SaveError::OutOfRange { field, value })
    }
}

fn pieces_from(side: Side, pieces: &[SavedPiece]) -> Result<Roster, SaveError> {
    let mut roster = Roster::new(side);
    for p in pieces {
        let kind = UnitKind::from_name(&p.kind)
            .ok_or_else(|| SaveError::UnknownKind(p.kind.clone()))?;
        roster.push(Unit::new(kind, square_from(p.row, p.col)?));
    }
    Ok(roster)
}

fn pieces_to(roster: &Roster) -> Vec<SavedPiece> {
    roster
        .units
        .iter()
        .map(|u| SavedPiece {
            kind: u.kind.name().to_string(),
            row: i64::from(u.square.row),
            col: i64::from(u.square.col),
        })
        .collect()
}

impl SaveGame {
    /// Captures a game state.
    pub fn from_state(state: &GameState) -> Self {
        SaveGame {
            supply: state.supply,
            morale: state.morale,
            intel: state.intel,
            fatigue: state.fatigue,
            turn: state.turn,
            player_pieces: pieces_to(&state.player),
            enemy_pieces: pieces_to(&state.enemy),
            fake_enemy_units: state
                .decoys
                .iter()
                .map(|d| SavedDecoy { row: i64::from(d.square.row), col: i64::from(d.square.col) })
                .collect(),
            sieges: state
                .sieges
                .iter()
                .map(|(sq, s)| {
                    (sq.to_string(), SavedSiege { stage: s.stage, attacker: s.attacker.name().to_string() })
                })
                .collect(),
        }
    }

    /// Rebuilds a game state. The result is always `Active`.
    pub fn into_state(self) -> Result<GameState, SaveError> {
        check_range("supply", i64::from(self.supply), -RESOURCE_LIMIT, RESOURCE_LIMIT)?;
        check_range("morale", i64::from(self.morale), -RESOURCE_LIMIT, RESOURCE_LIMIT)?;
        check_range("fatigue", i64::from(self.fatigue), 0, RESOURCE_LIMIT)?;
        check_range("intel", i64::from(self.intel), 0, i64::from(MAX_INTEL))?;
        check_range("turn", i64::from(self.turn), 1, TURN_LIMIT)?;

        let player = pieces_from(Side::Player, &self.player_pieces)?;
        let enemy = pieces_from(Side::Enemy, &self.enemy_pieces)?;

        let decoys = self
            .fake_enemy_units
            .iter()
            .map(|d| square_from(d.row, d.col).map(|square| Decoy { square }))
            .collect::<Result<Vec<_>, _>>()?;

        let mut sieges = BTreeMap::new();
        for (key, saved) in self.sieges {
            let square: Square = key
                .parse()
                .map_err(|_| SaveError::InvalidSiegeKey(key.clone()))?;
            if saved.stage == 0 || saved.stage > MAX_SIEGE_STAGE {
                return Err(SaveError::InvalidStage { square: key, stage: saved.stage });
            }
            let attacker = Side::from_name(&saved.attacker)
                .ok_or_else(|| SaveError::UnknownSide(saved.attacker.clone()))?;
            sieges.insert(square, Siege { stage: saved.stage, attacker });
        }

        Ok(GameState {
            player,
            enemy,
            decoys,
            sieges,
            supply: self.supply,
            morale: self.morale,
            fatigue: self.fatigue,
            intel: self.intel,
            turn: self.turn,
            status: GameStatus::Active,
        })
    }
}

/// Encodes a state as a JSON save string.
pub fn encode_save(state: &GameState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&SaveGame::from_state(state))?)
}

/// Decodes a JSON save string into a state.
pub fn decode_save(s: &str) -> Result<GameState, SaveError> {
    serde_json::from_str::<SaveGame>(s)?.into_state()
}

/// Writes a save file.
pub fn save_to_path(state: &GameState, path: &Path) -> Result<(), SaveError> {
    fs::write(path, encode_save(state)?)?;
    Ok(())
}

/// Reads a save file.
pub fn load_from_path(path: &Path) -> Result<GameState, SaveError> {
    decode_save(&fs::read_to_string(path)?)
}
