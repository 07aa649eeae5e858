//! Ruleset and difficulty configuration.
//!
//! Two presets exist. `Rules::fog()` is the default game: visibility is
//! gated by influence, commits are modified by control of the target, and
//! bishops gather intel. `Rules::classic()` is the open-board game with the
//! difficulty-driven opponent.

/// Tunable rules for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    /// Squares outside player influence are hidden and cannot be attacked.
    pub fog_of_war: bool,
    /// Supply regained at the end of each turn.
    pub replenish_rate: i32,
    /// Supply never replenishes past this.
    pub supply_cap: i32,
    /// Intel never rises past this.
    pub intel_cap: u32,
    /// Minimum power for a hit to kill or start a siege.
    pub siege_threshold: i32,
    /// Stage at which a siege captures its square.
    pub capture_stage: u8,
    /// Concurrent sieges that count as victory, if any.
    pub siege_count_victory: Option<usize>,
}

impl Rules {
    pub const fn fog() -> Self {
        Rules {
            fog_of_war: true,
            replenish_rate: 2,
            supply_cap: 20,
            intel_cap: 5,
            siege_threshold: 4,
            capture_stage: 3,
            siege_count_victory: None,
        }
    }

    pub const fn classic() -> Self {
        Rules {
            fog_of_war: false,
            replenish_rate: 1,
            supply_cap: 20,
            intel_cap: 5,
            siege_threshold: 4,
            capture_stage: 3,
            siege_count_victory: Some(3),
        }
    }

    /// Looks up a preset by its option value (`fog` or `classic`).
    pub fn from_name(s: &str) -> Option<Rules> {
        match s.to_ascii_lowercase().as_str() {
            "fog" => Some(Rules::fog()),
            "classic" => Some(Rules::classic()),
            _ => None,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Rules::fog()
    }
}

/// How hard the scripted opponent pushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// The numeric level (0, 1 or 2).
    pub const fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_level(level: u8) -> Option<Difficulty> {
        match level {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Normal),
            2 => Some(Difficulty::Hard),
            _ => None,
        }
    }
}
