//! Batch game simulation.
//!
//! Plays whole games with a random player policy against the scripted
//! opponent and tallies how they end. Useful for checking that a ruleset and
//! difficulty are winnable at all. Games run on a rayon pool when more than
//! one thread is configured; each game gets its own seed, so results do not
//! depend on the thread count.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{GameState, GameStatus, Outcome, Square, UnitKind};
use crate::control::{compute_influence, visible_under};
use crate::resolve::{commit, end_turn, reposition, REPOSITION_COST};
use crate::rules::{Difficulty, Rules};

/// Kinds the random policy commits. Kings are never committed.
const COMMIT_KINDS: [UnitKind; 5] = [
    UnitKind::Queen,
    UnitKind::Rook,
    UnitKind::Bishop,
    UnitKind::Knight,
    UnitKind::Pawn,
];

/// Largest supply the policy throws into a single commit.
const MAX_SPEND: i32 = 4;

/// Supply the policy keeps in reserve before repositioning.
const RESERVE: i32 = 6;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub num_games: usize,
    /// Games still running after this many turns are recorded as unfinished.
    pub max_turns: u32,
    pub rules: Rules,
    pub difficulty: Difficulty,
    pub threads: usize,
    /// Base seed (0 = entropy). Game `i` uses `seed + i`.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            num_games: 100,
            max_turns: 60,
            rules: Rules::default(),
            difficulty: Difficulty::default(),
            threads: 4,
            seed: 0,
        }
    }
}

/// Result of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub result: &'static str,
    pub turns: u32,
    pub enemy_remaining: usize,
    pub morale: i32,
    pub supply: i32,
}

/// Aggregate counts over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimSummary {
    pub victories: usize,
    pub defeats: usize,
    pub unfinished: usize,
}

impl SimSummary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut summary = SimSummary::default();
        for r in records {
            match r.result {
                "victory" => summary.victories += 1,
                "defeat" => summary.defeats += 1,
                _ => summary.unfinished += 1,
            }
        }
        summary
    }
}

fn result_name(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Over(Outcome::Victory) => "victory",
        GameStatus::Over(Outcome::Defeat) => "defeat",
        GameStatus::Active => "unfinished",
    }
}

fn game_rng(config: &SimConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Picks a random visible enemy square, if there is one.
fn choose_target(state: &GameState, rules: &Rules, rng: &mut impl Rng) -> Option<Square> {
    let tally = compute_influence(&state.player.units, &state.enemy.units);
    let targets: Vec<Square> = state
        .enemy
        .units
        .iter()
        .map(|u| u.square)
        .filter(|&sq| visible_under(rules, state, &tally, sq))
        .collect();
    if targets.is_empty() {
        None
    } else {
        Some(targets[rng.gen_range(0..targets.len())])
    }
}

/// Steps a random player unit one row toward the enemy.
fn advance_random_unit(state: &mut GameState, rng: &mut impl Rng) {
    if state.player.is_empty() || state.supply < RESERVE + REPOSITION_COST {
        return;
    }
    let from = state.player.units[rng.gen_range(0..state.player.len())].square;
    if let Some(to) = from.offset(-1, 0) {
        reposition(state, from, to);
    }
}

/// Plays one turn of the random policy followed by the end-of-turn sequence.
fn play_turn(state: &mut GameState, config: &SimConfig, rng: &mut SmallRng) {
    match choose_target(state, &config.rules, rng) {
        Some(target) => {
            let kind = COMMIT_KINDS[rng.gen_range(0..COMMIT_KINDS.len())];
            let spend = rng.gen_range(0..=state.supply.clamp(0, MAX_SPEND));
            commit(state, &config.rules, target, kind, spend);
        }
        None => advance_random_unit(state, rng),
    }
    end_turn(state, &config.rules, config.difficulty, rng);
}

/// Plays a single game to completion or the turn limit.
pub fn play_game(config: &SimConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut state = GameState::initial();
    while !state.is_over() && state.turn <= config.max_turns {
        play_turn(&mut state, config, rng);
    }
    GameRecord {
        game_id,
        result: result_name(state.status),
        turns: state.turn,
        enemy_remaining: state.enemy.len(),
        morale: state.morale,
        supply: state.supply,
    }
}

/// Runs a batch, in parallel when `config.threads > 1`.
pub fn run_simulation(config: &SimConfig) -> Vec<GameRecord> {
    if config.threads > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
            Ok(pool) => return pool.install(|| run_parallel(config)),
            Err(e) => tracing::warn!("falling back to sequential simulation: {}", e),
        }
    }
    (0..config.num_games)
        .map(|i| play_game(config, i, &mut game_rng(config, i)))
        .collect()
}

fn run_parallel(config: &SimConfig) -> Vec<GameRecord> {
    use rayon::prelude::*;

    (0..config.num_games)
        .into_par_iter()
        .map(|i| {
            let record = play_game(config, i, &mut game_rng(config, i));
            tracing::debug!(game = i, result = record.result, turns = record.turns, "game finished");
            record
        })
        .collect()
}

/// Writes records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(records: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}
