//! Command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the main loop dispatches on. This is the only place raw text is decoded;
//! everything past it works on squares, kinds, and integers.

use crate::board::{Square, UnitKind};

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a fresh game with the current options.
    NewGame,

    /// Select a square: `select <r,c>`.
    Select { square: Square },

    /// Commit a unit kind and supply at the selected square: `commit <kind> [supply]`.
    Commit { kind: UnitKind, supply: i32 },

    /// Enter reposition mode; the next two selections pick unit and destination.
    Reposition,

    /// Finish the turn.
    EndTurn,

    /// Print resources and turn.
    Status,

    /// Print the board.
    Board,

    /// Write the game to a file.
    Save { path: String },

    /// Replace the game with one read from a file.
    Load { path: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "reposition" => Some(Command::Reposition),
        "endturn" => Some(Command::EndTurn),
        "status" => Some(Command::Status),
        "board" => Some(Command::Board),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "select" => parse_select(&tokens),
        "commit" => parse_commit(&tokens),
        "save" => parse_path(&tokens, trimmed).map(|path| Command::Save { path }),
        "load" => parse_path(&tokens, trimmed).map(|path| Command::Load { path }),

        other => {
            tracing::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                tracing::warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `select <r,c>`.
fn parse_select(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        tracing::warn!("malformed select: expected 'select <row>,<col>'");
        return None;
    }
    match tokens[1].parse::<Square>() {
        Ok(square) => Some(Command::Select { square }),
        Err(()) => {
            tracing::warn!("invalid square: '{}'", tokens[1]);
            None
        }
    }
}

/// Parses `commit <kind> [supply]`.
fn parse_commit(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        tracing::warn!("malformed commit: expected 'commit <kind> [supply]'");
        return None;
    }
    let kind = match UnitKind::from_name(tokens[1]) {
        Some(k) => k,
        None => {
            tracing::warn!("unknown unit kind: '{}'", tokens[1]);
            return None;
        }
    };
    let supply = match tokens.get(2) {
        None => 0,
        Some(s) => match s.parse::<i32>() {
            Ok(v) if v >= 0 => v,
            _ => {
                tracing::warn!("invalid supply amount: '{}'", s);
                return None;
            }
        },
    };
    Some(Command::Commit { kind, supply })
}

/// Captures everything after the command word as a path.
fn parse_path(tokens: &[&str], full_line: &str) -> Option<String> {
    if tokens.len() < 2 {
        tracing::warn!("malformed {}: expected '{} <path>'", tokens[0], tokens[0]);
        return None;
    }
    Some(full_line[tokens[0].len()..].trim().to_string())
}
