//! Siege advancement.
//!
//! Each end of turn every player siege moves up one stage. A siege that
//! reaches the capture stage removes the besieged unit and pays out one
//! morale; any other siege costs one morale and one supply in upkeep.
//! Upkeep is not capped and may push resources to zero or below.

use crate::board::{GameState, Side, Square};
use crate::event::Event;
use crate::rules::Rules;

/// Advances all player sieges by one stage.
pub fn advance_sieges(state: &mut GameState, rules: &Rules) -> Vec<Event> {
    let mut events = Vec::new();
    let active: Vec<Square> = state
        .sieges
        .iter()
        .filter(|(_, s)| s.attacker == Side::Player)
        .map(|(sq, _)| *sq)
        .collect();

    for sq in active {
        let stage = match state.sieges.get_mut(&sq) {
            Some(siege) => {
                siege.stage = siege.stage.saturating_add(1);
                siege.stage
            }
            None => continue,
        };

        if stage >= rules.capture_stage {
            state.sieges.remove(&sq);
            if state.enemy.remove_at(sq).is_some() {
                state.morale += 1;
                events.push(Event::SiegeCaptured(sq));
            } else {
                events.push(Event::SiegeAbandoned(sq));
            }
        } else {
            state.morale -= 1;
            state.supply -= 1;
            events.push(Event::SiegeUpkeep(sq));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Siege, UnitKind};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn besieged() -> GameState {
        let mut state = GameState::empty();
        state.place_unit(Side::Enemy, UnitKind::Rook, 2, 2);
        state.sieges.insert(sq(2, 2), Siege::started_by(Side::Player));
        state
    }

    #[test]
    fn capture_after_two_advances() {
        let rules = Rules::fog();
        let mut state = besieged();

        let first = advance_sieges(&mut state, &rules);
        assert_eq!(first, vec![Event::SiegeUpkeep(sq(2, 2))]);
        assert_eq!(state.sieges[&sq(2, 2)].stage, 2);
        assert_eq!(state.enemy.len(), 1);
        assert_eq!(state.morale, 9);
        assert_eq!(state.supply, 19);

        let second = advance_sieges(&mut state, &rules);
        assert_eq!(second, vec![Event::SiegeCaptured(sq(2, 2))]);
        assert!(state.sieges.is_empty());
        assert!(state.enemy.is_empty());
        assert_eq!(state.morale, 10);
        assert_eq!(state.supply, 19);
    }

    #[test]
    fn upkeep_can_go_negative() {
        let rules = Rules::fog();
        let mut state = besieged();
        state.morale = 0;
        state.supply = 0;
        advance_sieges(&mut state, &rules);
        assert_eq!(state.morale, -1);
        assert_eq!(state.supply, -1);
    }

    #[test]
    fn vacated_square_is_released_without_reward() {
        let rules = Rules::fog();
        let mut state = besieged();
        state.sieges.get_mut(&sq(2, 2)).unwrap().stage = 2;
        state.enemy.units[0].square = sq(3, 2);
        let events = advance_sieges(&mut state, &rules);
        assert_eq!(events, vec![Event::SiegeAbandoned(sq(2, 2))]);
        assert!(state.sieges.is_empty());
        assert_eq!(state.morale, 10);
        assert_eq!(state.enemy.len(), 1);
    }

    #[test]
    fn enemy_sieges_are_not_advanced() {
        let rules = Rules::fog();
        let mut state = GameState::empty();
        state.sieges.insert(sq(6, 6), Siege::started_by(Side::Enemy));
        let events = advance_sieges(&mut state, &rules);
        assert!(events.is_empty());
        assert_eq!(state.sieges[&sq(6, 6)].stage, 1);
        assert_eq!(state.morale, 10);
    }

    #[test]
    fn several_sieges_each_pay_upkeep() {
        let rules = Rules::classic();
        let mut state = besieged();
        state.place_unit(Side::Enemy, UnitKind::Pawn, 1, 1);
        state.sieges.insert(sq(1, 1), Siege::started_by(Side::Player));
        let events = advance_sieges(&mut state, &rules);
        assert_eq!(events.len(), 2);
        assert_eq!(state.morale, 8);
        assert_eq!(state.supply, 18);
    }

    #[test]
    fn top_stage_siege_captures() {
        let rules = Rules::fog();
        let mut state = besieged();
        state.sieges.get_mut(&sq(2, 2)).unwrap().stage = u8::MAX;
        let events = advance_sieges(&mut state, &rules);
        assert_eq!(events, vec![Event::SiegeCaptured(sq(2, 2))]);
        assert!(state.sieges.is_empty());
    }
}
