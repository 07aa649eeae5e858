//! Integration tests for the linewar engine binary.
//!
//! Drives full protocol sessions by spawning the engine process, sending
//! commands via stdin, and checking the lines it writes to stdout.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_linewar");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start linewar");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn status_line(lines: &[String]) -> &str {
    lines
        .iter()
        .rev()
        .find(|l| l.starts_with("status "))
        .map(String::as_str)
        .expect("no status line")
}

#[test]
fn isready_replies_readyok() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_and_malformed_commands_are_ignored() {
    let lines = run_engine(&["dance", "select 9,9", "commit dragon 3", "", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn status_reports_starting_resources() {
    let lines = run_engine(&["status", "quit"]);
    assert_eq!(lines, vec!["status turn 1 supply 20 morale 10 fatigue 0 intel 0 sieges 0"]);
}

#[test]
fn board_prints_eight_rows() {
    let lines = run_engine(&["setoption name Rules value classic", "newgame", "board", "quit"]);
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|l| l.starts_with("board ")));
    assert_eq!(lines[0], "board . n b . k . . r");
    assert_eq!(lines[7], "board R . B . K N . .");
}

#[test]
fn fog_hides_the_enemy_back_rank() {
    let lines = run_engine(&["board", "quit"]);
    assert_eq!(lines.len(), 8);
    assert!(!lines[0].contains('k'), "enemy king should be fogged: {}", lines[0]);
    assert!(lines[7].starts_with("board R"));
}

#[test]
fn blind_commit_costs_morale() {
    let lines = run_engine(&["select 0,4", "commit queen 2", "status", "quit"]);
    assert_eq!(lines[0], "log Attack on 0,4 failed: no line of sight (-1 Morale).");
    assert_eq!(status_line(&lines), "status turn 1 supply 20 morale 9 fatigue 1 intel 0 sieges 0");
}

#[test]
fn commit_without_selection_or_with_king_is_ignored() {
    let lines = run_engine(&["commit queen 1", "select 1,4", "commit king 3", "status", "quit"]);
    assert_eq!(lines, vec!["status turn 1 supply 20 morale 10 fatigue 0 intel 0 sieges 0"]);
}

#[test]
fn reposition_flow() {
    let lines = run_engine(&["reposition", "select 7,5", "select 6,6", "status", "quit"]);
    assert_eq!(
        lines,
        vec![
            "log Reposition mode active.",
            "log Piece at 7,5 selected for reposition.",
            "log Piece repositioned from 7,5 to 6,6 (-2 Supply).",
            "status turn 1 supply 18 morale 10 fatigue 0 intel 0 sieges 0",
        ]
    );
}

#[test]
fn end_turn_advances_the_turn() {
    let lines = run_engine(&["setoption name Seed value 3", "newgame", "endturn", "status", "quit"]);
    assert!(status_line(&lines).starts_with("status turn 2 supply 20 morale "));
}

#[test]
fn save_then_load_restores_the_game() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");
    let save = format!("save {}", path.display());
    let load = format!("load {}", path.display());

    let lines = run_engine(&[
        "select 0,4",
        "commit queen 0",
        &save,
        "select 0,4",
        "commit queen 0",
        "status",
        &load,
        "status",
        "quit",
    ]);
    assert!(lines.contains(&"log Game saved.".to_string()));
    assert!(lines.contains(&"log Game loaded.".to_string()));
    let statuses: Vec<&String> = lines.iter().filter(|l| l.starts_with("status ")).collect();
    assert_eq!(statuses[0], "status turn 1 supply 20 morale 8 fatigue 2 intel 0 sieges 0");
    assert_eq!(statuses[1], "status turn 1 supply 20 morale 9 fatigue 1 intel 0 sieges 0");
}

#[test]
fn loading_a_missing_file_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let load = format!("load {}", dir.path().join("absent.json").display());
    let lines = run_engine(&[&load, "status", "quit"]);
    assert_eq!(lines, vec!["status turn 1 supply 20 morale 10 fatigue 0 intel 0 sieges 0"]);
}

#[test]
fn game_ends_when_enemy_king_is_gone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("endgame.json");
    std::fs::write(
        &path,
        r#"{"supply": 20, "morale": 10, "fatigue": 0, "turn": 4,
            "playerPieces": [{"type": "king", "row": 7, "col": 4}],
            "enemyPieces": [{"type": "pawn", "row": 1, "col": 1}]}"#,
    )
    .unwrap();
    let load = format!("load {}", path.display());

    let lines = run_engine(&[&load, "endturn", "endturn", "select 1,1", "commit queen 1", "quit"]);
    assert_eq!(lines[0], "log Game loaded.");
    assert!(lines.contains(&"log YOU WIN - ENEMY COLLAPSED".to_string()));
    assert_eq!(lines.last().unwrap(), "gameover YOU WIN - ENEMY COLLAPSED");
    assert_eq!(lines.iter().filter(|l| l.starts_with("gameover")).count(), 1);
}
