//! Batch simulation CLI.
//!
//! Plays games with a random player policy and writes one JSON record per
//! game, followed by a summary on stderr.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --games N        Number of games to play (default: 100)
//!   --max-turns N    Turn limit per game (default: 60)
//!   --rules NAME     Ruleset, "fog" or "classic" (default: fog)
//!   --difficulty N   Opponent level 0-2 (default: 1)
//!   --threads N      Number of parallel threads (default: 4)
//!   --seed N         Random seed, 0 for entropy (default: 0)
//!   --output FILE    Output file path (default: stdout)
//!   --quiet          Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use linewar::rules::{Difficulty, Rules};
use linewar::simulate::{self, SimConfig, SimSummary};

fn fail(msg: &str) -> ! {
    eprintln!("{}", msg);
    print_usage();
    process::exit(1);
}

fn value<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|s| s.parse().ok()) {
        Some(v) => v,
        None => fail(&format!("invalid {} value", flag)),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linewar=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = SimConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value(&args, i, "--games");
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = value(&args, i, "--max-turns");
            }
            "--rules" => {
                i += 1;
                let name: String = value(&args, i, "--rules");
                config.rules = Rules::from_name(&name)
                    .unwrap_or_else(|| fail(&format!("unknown ruleset: {}", name)));
            }
            "--difficulty" => {
                i += 1;
                let level: u8 = value(&args, i, "--difficulty");
                config.difficulty = Difficulty::from_level(level)
                    .unwrap_or_else(|| fail(&format!("difficulty out of range: {}", level)));
            }
            "--threads" => {
                i += 1;
                config.threads = value(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = value(&args, i, "--seed");
            }
            "--output" => {
                i += 1;
                output_path = Some(value(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    if !quiet {
        eprintln!(
            "Simulate: {} games, max {} turns, {:?} difficulty, {} threads",
            config.num_games, config.max_turns, config.difficulty, config.threads
        );
    }

    let start = Instant::now();
    let records = simulate::run_simulation(&config);
    let elapsed = start.elapsed();

    let result = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| simulate::write_jsonl(&records, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            simulate::write_jsonl(&records, &mut writer)
        }
    };
    if let Err(e) = result {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }

    if !quiet {
        let summary = SimSummary::from_records(&records);
        eprintln!(
            "Completed {} games in {:.1}s: {} victories, {} defeats, {} unfinished",
            records.len(),
            elapsed.as_secs_f64(),
            summary.victories,
            summary.defeats,
            summary.unfinished
        );
        if let Some(path) = output_path {
            eprintln!("Wrote {} games to {}", records.len(), path);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of games to play (default: 100)");
    eprintln!("  --max-turns N    Turn limit per game (default: 60)");
    eprintln!("  --rules NAME     Ruleset, fog or classic (default: fog)");
    eprintln!("  --difficulty N   Opponent level 0-2 (default: 1)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
