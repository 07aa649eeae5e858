//! Scripted enemy behaviour.
//!
//! The opponent is a handful of fixed reactions, not a search. On the open
//! board it leans on an exposed king, tries to break sieges, and on hard
//! difficulty pushes a unit forward. Under fog of war it only harasses.

use rand::Rng;

use crate::board::{GameState, Side, Square, UnitKind, BOARD_SIZE};
use crate::control::compute_influence;
use crate::event::Event;
use crate::rules::{Difficulty, Rules};

/// Chance that a harassment raid costs the player one morale.
const HARASS_CHANCE: f64 = 0.5;

/// Base chance of breaking each siege, before difficulty.
const DISRUPT_BASE: f64 = 0.3;

/// Extra siege-breaking chance per difficulty level.
const DISRUPT_PER_LEVEL: f64 = 0.2;

/// Runs the enemy's reaction for one end of turn.
pub fn enemy_action(
    state: &mut GameState,
    rules: &Rules,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Vec<Event> {
    if rules.fog_of_war {
        return harass(state, rng);
    }

    let mut events = Vec::new();
    let level = difficulty.level();

    if level > 0 {
        if let Some(pressure) = pressure_king(state, level) {
            events.push(pressure);
        }
    }

    let chance = DISRUPT_BASE + DISRUPT_PER_LEVEL * f64::from(level);
    let besieged: Vec<Square> = state
        .sieges
        .iter()
        .filter(|(_, s)| s.attacker == Side::Player)
        .map(|(sq, _)| *sq)
        .collect();
    for sq in besieged {
        if rng.gen_bool(chance) {
            state.sieges.remove(&sq);
            events.push(Event::SiegeDisrupted(sq));
        }
    }

    if difficulty == Difficulty::Hard {
        if let Some(advance) = advance_one(state) {
            events.push(advance);
        }
    }

    events
}

/// Flat coin flip for one morale.
fn harass(state: &mut GameState, rng: &mut impl Rng) -> Vec<Event> {
    if rng.gen_bool(HARASS_CHANCE) {
        state.morale -= 1;
        vec![Event::EnemyHarassment]
    } else {
        Vec::new()
    }
}

/// Drains `level` morale if enemy influence outweighs the player's on the king.
fn pressure_king(state: &mut GameState, level: u8) -> Option<Event> {
    let king = state.player.find_kind(UnitKind::King)?.square;
    let tally = compute_influence(&state.player.units, &state.enemy.units);
    let control = tally.get(king);
    if control.enemy > control.player {
        let lost = i32::from(level);
        state.morale -= lost;
        Some(Event::KingPressured { morale_lost: lost })
    } else {
        None
    }
}

/// Moves the first non-king enemy unit one row toward the player.
fn advance_one(state: &mut GameState) -> Option<Event> {
    let unit = state.enemy.units.iter_mut().find(|u| u.kind != UnitKind::King)?;
    if unit.square.row + 1 >= BOARD_SIZE {
        return None;
    }
    let from = unit.square;
    let to = Square { row: from.row + 1, col: from.col };
    unit.square = to;
    Some(Event::EnemyAdvanced { from, to })
}
