//! Repositioning a player unit by one square.

use crate::board::{GameState, Square};
use crate::event::Event;

/// Supply spent on each reposition.
pub const REPOSITION_COST: i32 = 2;

/// Moves the player unit on `from` to an adjacent `to`.
///
/// Returns None and leaves the state untouched when the game is over, no
/// player unit stands on `from`, `to` is not a neighbouring square, or
/// supply is short.
pub fn reposition(state: &mut GameState, from: Square, to: Square) -> Option<Event> {
    if state.is_over() || from.chebyshev(to) != 1 || state.supply < REPOSITION_COST {
        return None;
    }
    let unit = state.player.at_mut(from)?;
    unit.square = to;
    state.supply -= REPOSITION_COST;
    Some(Event::Repositioned { from, to })
}
