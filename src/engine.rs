//! Engine state management.
//!
//! Holds the current game, the active ruleset, engine options, the square
//! selection and reposition mode, and the random source for the opponent.
//! Each handler applies one complete transition and returns its log events.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{GameState, GameStatus, Square, UnitKind};
use crate::event::Event;
use crate::protocol::render::render_board;
use crate::protocol::save::{load_from_path, save_to_path};
use crate::resolve::{commit, end_turn, reposition};
use crate::rules::{Difficulty, Rules};

/// Where the reposition flow stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositionMode {
    Off,
    AwaitingUnit,
    AwaitingDestination(Square),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub state: GameState,
    pub rules: Rules,
    pub options: HashMap<String, String>,
    pub selected: Option<Square>,
    pub mode: RepositionMode,
    rng: SmallRng,
}

impl Engine {
    /// Creates an engine on the opening position with default options.
    pub fn new() -> Self {
        Engine {
            state: GameState::initial(),
            rules: Rules::default(),
            options: HashMap::new(),
            selected: None,
            mode: RepositionMode::Off,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Starts a new game, applying the `Rules` and `Seed` options.
    pub fn new_game(&mut self) {
        self.rules = self
            .options
            .get("Rules")
            .and_then(|v| Rules::from_name(v))
            .unwrap_or_default();
        if let Some(seed) = self.seed() {
            self.rng = SmallRng::seed_from_u64(seed);
        }
        self.state = GameState::initial();
        self.selected = None;
        self.mode = RepositionMode::Off;
        tracing::info!(fog = self.rules.fog_of_war, difficulty = ?self.difficulty(), "new game");
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns the configured difficulty (default Normal).
    pub fn difficulty(&self) -> Difficulty {
        self.options
            .get("Difficulty")
            .and_then(|v| v.parse::<u8>().ok())
            .and_then(Difficulty::from_level)
            .unwrap_or_default()
    }

    /// Returns the configured seed, if non-zero.
    fn seed(&self) -> Option<u64> {
        self.options
            .get("Seed")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&s| s != 0)
    }

    /// Selects a square. In reposition mode this picks the unit, then the destination.
    pub fn select(&mut self, square: Square) -> Vec<Event> {
        self.selected = Some(square);
        if self.state.is_over() {
            self.mode = RepositionMode::Off;
            return Vec::new();
        }
        let mode = self.mode;
        match mode {
            RepositionMode::Off => Vec::new(),
            _ if self.state.player.occupies(square) => {
                self.mode = RepositionMode::AwaitingDestination(square);
                vec![Event::UnitSelected(square)]
            }
            RepositionMode::AwaitingDestination(from) => {
                match reposition(&mut self.state, from, square) {
                    Some(event) => {
                        self.mode = RepositionMode::Off;
                        vec![event]
                    }
                    None => Vec::new(),
                }
            }
            RepositionMode::AwaitingUnit => Vec::new(),
        }
    }

    /// Enters reposition mode.
    pub fn enter_reposition(&mut self) -> Vec<Event> {
        if self.state.is_over() {
            return Vec::new();
        }
        self.mode = RepositionMode::AwaitingUnit;
        vec![Event::RepositionMode]
    }

    /// Commits a unit kind and supply at the selected square.
    pub fn commit(&mut self, kind: UnitKind, supply: i32) -> Vec<Event> {
        let target = match self.selected {
            Some(sq) => sq,
            None => return Vec::new(),
        };
        commit(&mut self.state, &self.rules, target, kind, supply).events
    }

    /// Runs the end-of-turn sequence.
    pub fn end_turn(&mut self) -> Vec<Event> {
        let difficulty = self.difficulty();
        let events = end_turn(&mut self.state, &self.rules, difficulty, &mut self.rng);
        if self.state.is_over() {
            self.mode = RepositionMode::Off;
        }
        events
    }

    /// Saves the game. Failures are logged and produce no event.
    pub fn save(&self, path: &Path) -> Vec<Event> {
        match save_to_path(&self.state, path) {
            Ok(()) => vec![Event::GameSaved],
            Err(e) => {
                tracing::warn!(path = %path.display(), "save failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Loads a game. A missing or corrupt save leaves everything unchanged.
    pub fn load(&mut self, path: &Path) -> Vec<Event> {
        match load_from_path(path) {
            Ok(state) => {
                self.state = state;
                self.selected = None;
                self.mode = RepositionMode::Off;
                vec![Event::GameLoaded]
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "no usable save: {}", e);
                Vec::new()
            }
        }
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Writes the resource line.
    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let s = &self.state;
        writeln!(
            out,
            "status turn {} supply {} morale {} fatigue {} intel {} sieges {}",
            s.turn,
            s.supply,
            s.morale,
            s.fatigue,
            s.intel,
            s.sieges.len()
        )?;
        out.flush()
    }

    /// Writes the board, one `board` line per row.
    pub fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in render_board(&self.state, &self.rules) {
            writeln!(out, "board {}", row)?;
        }
        out.flush()
    }

    /// Writes log lines for events, plus the banner if the game just ended.
    pub fn write_events<W: Write>(&self, out: &mut W, events: &[Event]) -> io::Result<()> {
        for event in events {
            tracing::debug!(?event, "event");
            writeln!(out, "log {}", event)?;
            if let (Event::GameOver(_), GameStatus::Over(outcome)) = (event, self.state.status) {
                writeln!(out, "gameover {}", outcome.banner())?;
            }
        }
        out.flush()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Outcome, Side};

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_engine_starts_opening_position() {
        let engine = Engine::new();
        assert_eq!(engine.state, GameState::initial());
        assert_eq!(engine.rules, Rules::fog());
        assert!(engine.selected.is_none());
        assert_eq!(engine.mode, RepositionMode::Off);
    }

    #[test]
    fn new_game_applies_rules_option() {
        let mut engine = Engine::new();
        engine.set_option("Rules".to_string(), Some("classic".to_string()));
        engine.set_option("Seed".to_string(), Some("42".to_string()));
        engine.state.supply = 3;
        engine.new_game();
        assert_eq!(engine.rules, Rules::classic());
        assert_eq!(engine.state.supply, 20);
    }

    #[test]
    fn difficulty_option() {
        let mut engine = Engine::new();
        assert_eq!(engine.difficulty(), Difficulty::Normal);
        engine.set_option("Difficulty".to_string(), Some("2".to_string()));
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        engine.set_option("Difficulty".to_string(), Some("7".to_string()));
        assert_eq!(engine.difficulty(), Difficulty::Normal);
    }

    #[test]
    fn commit_without_selection_is_ignored() {
        let mut engine = Engine::new();
        assert!(engine.commit(UnitKind::Queen, 0).is_empty());
        assert_eq!(engine.state, GameState::initial());
    }

    #[test]
    fn commit_into_fog_fails() {
        let mut engine = Engine::new();
        engine.select(sq(0, 4));
        let events = engine.commit(UnitKind::Queen, 2);
        assert_eq!(events, vec![Event::AttackBlind(sq(0, 4))]);
        assert_eq!(engine.state.morale, 9);
        assert_eq!(engine.state.supply, 20);
        assert_eq!(engine.state.fatigue, 1);
    }

    #[test]
    fn reposition_flow() {
        let mut engine = Engine::new();
        assert_eq!(engine.enter_reposition(), vec![Event::RepositionMode]);
        // Empty square while waiting for a unit does nothing.
        assert!(engine.select(sq(4, 4)).is_empty());
        assert_eq!(engine.select(sq(7, 5)), vec![Event::UnitSelected(sq(7, 5))]);
        // Too far: mode stays active.
        assert!(engine.select(sq(4, 5)).is_empty());
        assert_eq!(engine.mode, RepositionMode::AwaitingDestination(sq(7, 5)));
        assert_eq!(
            engine.select(sq(6, 6)),
            vec![Event::Repositioned { from: sq(7, 5), to: sq(6, 6) }]
        );
        assert_eq!(engine.mode, RepositionMode::Off);
        assert_eq!(engine.state.supply, 18);
        assert!(engine.state.player.at(sq(6, 6)).is_some());
    }

    #[test]
    fn game_over_cancels_pending_reposition() {
        let mut engine = Engine::new();
        engine.enter_reposition();
        engine.state.enemy.remove_at(sq(0, 4));
        let events = engine.end_turn();
        assert!(events.contains(&Event::GameOver(Outcome::Victory)));
        assert_eq!(engine.mode, RepositionMode::Off);
        assert!(engine.select(sq(7, 5)).is_empty());
        assert_eq!(engine.mode, RepositionMode::Off);
    }

    #[test]
    fn finished_game_ignores_selection_in_reposition_mode() {
        let mut engine = Engine::new();
        engine.enter_reposition();
        engine.state.status = GameStatus::Over(Outcome::Defeat);
        assert!(engine.select(sq(7, 5)).is_empty());
        assert_eq!(engine.mode, RepositionMode::Off);
        assert!(engine.select(sq(6, 6)).is_empty());
        assert!(engine.state.player.at(sq(7, 5)).is_some());
    }

    #[test]
    fn selecting_outside_reposition_only_selects() {
        let mut engine = Engine::new();
        assert!(engine.select(sq(7, 5)).is_empty());
        assert_eq!(engine.selected, Some(sq(7, 5)));
        assert_eq!(engine.state, GameState::initial());
    }

    #[test]
    fn save_and_load_restore_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut engine = Engine::new();
        engine.state.supply = 11;
        engine.state.place_unit(Side::Enemy, UnitKind::Pawn, 4, 4);
        assert_eq!(engine.save(&path), vec![Event::GameSaved]);
        let saved = engine.state.clone();

        engine.new_game();
        assert_eq!(engine.load(&path), vec![Event::GameLoaded]);
        assert_eq!(engine.state, saved);
    }

    #[test]
    fn bad_load_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.json");
        std::fs::write(&path, "{\"supply\":").unwrap();

        let mut engine = Engine::new();
        engine.state.morale = 4;
        let before = engine.state.clone();
        assert!(engine.load(&path).is_empty());
        assert!(engine.load(&dir.path().join("absent.json")).is_empty());
        assert_eq!(engine.state, before);
    }

    #[test]
    fn status_line() {
        let engine = Engine::new();
        let text = output_of(|out| engine.handle_status(out));
        assert_eq!(text.trim(), "status turn 1 supply 20 morale 10 fatigue 0 intel 0 sieges 0");
    }

    #[test]
    fn board_lines() {
        let engine = Engine::new();
        let text = output_of(|out| engine.handle_board(out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines.iter().all(|l| l.starts_with("board ")));
        assert_eq!(lines[7], "board R . B . K N . .");
    }

    #[test]
    fn game_over_banner_follows_event() {
        let mut engine = Engine::new();
        engine.state.status = GameStatus::Over(Outcome::Victory);
        let text = output_of(|out| engine.write_events(out, &[Event::GameOver(Outcome::Victory)]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![
            "log YOU WIN - ENEMY COLLAPSED",
            "gameover YOU WIN - ENEMY COLLAPSED",
        ]);
    }

    #[test]
    fn finished_game_ignores_actions() {
        let mut engine = Engine::new();
        engine.state.status = GameStatus::Over(Outcome::Defeat);
        let before = engine.state.clone();
        engine.select(sq(1, 4));
        assert!(engine.commit(UnitKind::Queen, 1).is_empty());
        assert!(engine.end_turn().is_empty());
        assert!(engine.enter_reposition().is_empty());
        assert_eq!(engine.state, before);
    }
}
