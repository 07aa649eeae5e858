//! End-of-turn sequencing.
//!
//! Turn flow, always in this order:
//! - advance player sieges
//! - enemy reaction
//! - fatigue recovers by one, supply replenishes up to the cap
//! - turn counter increments
//! - victory, then defeat, is evaluated; either one ends the game

use rand::Rng;

use crate::board::{GameState, GameStatus, Outcome};
use crate::event::Event;
use crate::opponent::enemy_action;
use crate::rules::{Difficulty, Rules};

use super::siege::advance_sieges;

/// Recovers fatigue and replenishes supply.
pub fn replenish(state: &mut GameState, rules: &Rules) {
    state.fatigue = state.fatigue.saturating_sub(1);
    state.supply = state.supply.saturating_add(rules.replenish_rate).min(rules.supply_cap);
}

/// Returns true if the enemy has collapsed.
pub fn is_victory(state: &GameState, rules: &Rules) -> bool {
    let siege_win = rules
        .siege_count_victory
        .is_some_and(|n| state.sieges.len() >= n);
    !state.enemy.has_king() || state.enemy.is_empty() || siege_win
}

/// Returns true if the player's forces have collapsed.
pub fn is_defeat(state: &GameState) -> bool {
    !state.player.has_king() || state.morale <= 0 || state.supply <= 0
}

/// Evaluates victory and defeat, victory first.
pub fn evaluate(state: &GameState, rules: &Rules) -> Option<Outcome> {
    if is_victory(state, rules) {
        Some(Outcome::Victory)
    } else if is_defeat(state) {
        Some(Outcome::Defeat)
    } else {
        None
    }
}

/// Runs the full end-of-turn sequence. Does nothing once the game is over.
pub fn end_turn(
    state: &mut GameState,
    rules: &Rules,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Vec<Event> {
    if state.is_over() {
        return Vec::new();
    }

    let mut events = advance_sieges(state, rules);
    events.extend(enemy_action(state, rules, difficulty, rng));
    replenish(state, rules);
    state.turn = state.turn.saturating_add(1);

    if let Some(outcome) = evaluate(state, rules) {
        state.status = GameStatus::Over(outcome);
        tracing::info!(turn = state.turn, ?outcome, "game over");
        events.push(Event::GameOver(outcome));
    }

    events
}
