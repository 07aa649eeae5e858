//! Line War -- a fog-of-war siege game driven over a text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust.

use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing_subscriber::EnvFilter;

use linewar::engine::Engine;
use linewar::protocol::parser::{parse_command, Command};

/// Dispatches one command. Returns false when the loop should stop.
fn dispatch<W: Write>(engine: &mut Engine, cmd: Command, out: &mut W) -> io::Result<bool> {
    let events = match cmd {
        Command::IsReady => {
            engine.handle_isready(out)?;
            return Ok(true);
        }
        Command::SetOption { name, value } => {
            engine.set_option(name, value);
            return Ok(true);
        }
        Command::NewGame => {
            engine.new_game();
            return Ok(true);
        }
        Command::Status => {
            engine.handle_status(out)?;
            return Ok(true);
        }
        Command::Board => {
            engine.handle_board(out)?;
            return Ok(true);
        }
        Command::Quit => return Ok(false),
        Command::Select { square } => engine.select(square),
        Command::Commit { kind, supply } => engine.commit(kind, supply),
        Command::Reposition => engine.enter_reposition(),
        Command::EndTurn => engine.end_turn(),
        Command::Save { path } => engine.save(Path::new(&path)),
        Command::Load { path } => engine.load(Path::new(&path)),
    };
    engine.write_events(out, &events)?;
    Ok(true)
}

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linewar=info")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match dispatch(&mut engine, cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                tracing::error!("failed to write response: {}", e);
                break;
            }
        }
    }
}
