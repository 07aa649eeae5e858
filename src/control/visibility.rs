//! Fog of war.
//!
//! A square is visible when at least one player unit projects influence onto
//! it, contested or not. Squares holding a player unit are always visible.

use crate::board::{GameState, Roster, Square};
use crate::rules::Rules;

use super::influence::InfluenceMap;

/// Returns true if the player can see `sq`.
pub fn is_visible(sq: Square, tally: &InfluenceMap, player: &Roster) -> bool {
    player.occupies(sq) || tally.get(sq).player > 0
}

/// Visibility under a ruleset: without fog of war every square is visible.
pub fn visible_under(rules: &Rules, state: &GameState, tally: &InfluenceMap, sq: Square) -> bool {
    !rules.fog_of_war || is_visible(sq, tally, &state.player)
}

/// Per-square visibility for the whole board, indexed by `Square::index`.
pub fn visibility_mask(tally: &InfluenceMap, player: &Roster) -> Vec<bool> {
    Square::all().map(|sq| is_visible(sq, tally, player)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Side, Unit, UnitKind};
    use crate::control::influence::compute_influence;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn influence_grants_vision() {
        let player = Roster::with_units(Side::Player, vec![Unit::new(UnitKind::King, sq(7, 4))]);
        let enemy = [Unit::new(UnitKind::Queen, sq(5, 4))];
        let tally = compute_influence(&player.units, &enemy);
        assert!(is_visible(sq(6, 4), &tally, &player));
        assert!(is_visible(sq(6, 3), &tally, &player));
        assert!(!is_visible(sq(5, 4), &tally, &player));
        assert!(!is_visible(sq(0, 0), &tally, &player));
    }

    #[test]
    fn own_square_always_visible() {
        // A knight does not influence its own square.
        let player = Roster::with_units(Side::Player, vec![Unit::new(UnitKind::Knight, sq(3, 3))]);
        let tally = compute_influence(&player.units, &[]);
        assert_eq!(tally.get(sq(3, 3)).player, 0);
        assert!(is_visible(sq(3, 3), &tally, &player));
        // Even with an empty tally.
        assert!(is_visible(sq(3, 3), &InfluenceMap::empty(), &player));
    }

    #[test]
    fn classic_rules_see_everything() {
        let state = GameState::initial();
        let tally = compute_influence(&state.player.units, &state.enemy.units);
        assert!(!visible_under(&Rules::fog(), &state, &tally, sq(0, 3)));
        assert!(visible_under(&Rules::classic(), &state, &tally, sq(0, 3)));
        // The rook on 7,0 sees up its file.
        assert!(visible_under(&Rules::fog(), &state, &tally, sq(0, 0)));
    }

    #[test]
    fn mask_matches_predicate() {
        let state = GameState::initial();
        let tally = compute_influence(&state.player.units, &state.enemy.units);
        let mask = visibility_mask(&tally, &state.player);
        for s in Square::all() {
            assert_eq!(mask[s.index()], is_visible(s, &tally, &state.player));
        }
    }
}
