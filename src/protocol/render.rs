//! Board projection for display.
//!
//! Pure functions of the game state. Enemy units and decoys only show on
//! squares the player can see.

use crate::board::{GameState, Square, BOARD_SIZE, SQUARE_COUNT};
use crate::control::{compute_influence, visibility_mask, visible_under, ControlStatus, InfluenceMap};
use crate::rules::Rules;

/// Glyph for a visible decoy.
pub const DECOY_GLYPH: char = 'd';

/// Glyph for a hidden square.
pub const FOG_GLYPH: char = '?';

/// Glyph for a visible empty square.
pub const EMPTY_GLYPH: char = '.';

/// Display attributes of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareView {
    pub occupant: Option<char>,
    pub control: ControlStatus,
    pub fogged: bool,
    pub siege_stage: Option<u8>,
}

impl SquareView {
    /// The single character drawn for this square.
    pub fn glyph(&self) -> char {
        match self.occupant {
            Some(c) => c,
            None if self.fogged => FOG_GLYPH,
            None => EMPTY_GLYPH,
        }
    }
}

/// Projects one square.
pub fn square_view(state: &GameState, tally: &InfluenceMap, rules: &Rules, sq: Square) -> SquareView {
    view_of(state, tally, sq, visible_under(rules, state, tally, sq))
}

fn view_of(state: &GameState, tally: &InfluenceMap, sq: Square, visible: bool) -> SquareView {
    let occupant = if let Some(glyph) = state.player.glyph_at(sq) {
        Some(glyph)
    } else if !visible {
        None
    } else {
        state.enemy.glyph_at(sq).or_else(|| state.decoy_at(sq).map(|_| DECOY_GLYPH))
    };
    SquareView {
        occupant,
        control: tally.status(sq),
        fogged: !visible,
        siege_stage: state.sieges.get(&sq).map(|s| s.stage),
    }
}

/// Renders the board as eight rows of glyphs, row 0 first.
///
/// Besieged squares are followed by their stage, other squares by a space.
pub fn render_board(state: &GameState, rules: &Rules) -> Vec<String> {
    let tally = compute_influence(&state.player.units, &state.enemy.units);
    let visible = if rules.fog_of_war {
        visibility_mask(&tally, &state.player)
    } else {
        vec![true; SQUARE_COUNT]
    };
    (0..BOARD_SIZE)
        .map(|row| {
            let mut line = String::with_capacity(2 * BOARD_SIZE as usize);
            for col in 0..BOARD_SIZE {
                let sq = Square { row, col };
                let view = view_of(state, &tally, sq, visible[sq.index()]);
                line.push(view.glyph());
                match view.siege_stage {
                    Some(stage) => line.push(char::from(b'0' + stage.min(9))),
                    None => line.push(' '),
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}
