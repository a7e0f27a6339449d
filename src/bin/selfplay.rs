//! Self-play game generation CLI.
//!
//! Plays AI-vs-AI Chain Reaction games and writes one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N         Number of games to play (default: 10)
//!   --depth D         Search depth for both sides (default: 3)
//!   --red-depth D     Search depth for Red
//!   --blue-depth D    Search depth for Blue
//!   --threads N       Number of parallel threads (default: 4)
//!   --seed N          Random seed, 0 for entropy (default: 0)
//!   --max-plies N     Ply limit per game (default: 400)
//!   --random-plies N  Random opening plies (default: 2)
//!   --evaluator NAME  weighted, flat, territorial, or a feature name
//!   --config FILE     JSON config; later flags override it
//!   --output FILE     Output file path (default: stdout)
//!   --quiet           Suppress progress and summary output

use std::env;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use chain_reaction::eval::EvalConfig;
use chain_reaction::selfplay::{self, SelfPlayConfig, SelfPlayError, Summary};

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parses the value following `flag`.
fn value<T>(args: &[String], i: usize, flag: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = args
        .get(i)
        .ok_or_else(|| format!("missing value for {flag}"))?;
    raw.parse()
        .map_err(|e| format!("invalid {flag} value '{raw}': {e}"))
}

struct Cli {
    config: SelfPlayConfig,
    output_path: Option<String>,
}

fn parse_args(args: &[String]) -> Result<Option<Cli>, String> {
    // A config file is the base layer; every other flag overrides it.
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path: String = value(args, i + 1, "--config")?;
            let json = fs::read_to_string(&path)
                .map_err(|e| format!("failed to read config '{path}': {e}"))?;
            SelfPlayConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None => SelfPlayConfig::default(),
    };
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = value(args, i, "--games")?;
            }
            "--depth" => {
                i += 1;
                let depth = value(args, i, "--depth")?;
                config.red_depth = depth;
                config.blue_depth = depth;
            }
            "--red-depth" => {
                i += 1;
                config.red_depth = value(args, i, "--red-depth")?;
            }
            "--blue-depth" => {
                i += 1;
                config.blue_depth = value(args, i, "--blue-depth")?;
            }
            "--threads" => {
                i += 1;
                config.threads = value(args, i, "--threads")?;
            }
            "--seed" => {
                i += 1;
                config.seed = value(args, i, "--seed")?;
            }
            "--max-plies" => {
                i += 1;
                config.max_plies = value(args, i, "--max-plies")?;
            }
            "--random-plies" => {
                i += 1;
                config.random_plies = value(args, i, "--random-plies")?;
            }
            "--evaluator" => {
                i += 1;
                let name: String = value(args, i, "--evaluator")?;
                let symmetric = config.eval.symmetric;
                config.eval = EvalConfig::from_name(&name)
                    .ok_or_else(|| format!("unknown evaluator '{name}'"))?
                    .with_symmetric(symmetric);
            }
            "--config" => {
                i += 1;
            }
            "--output" => {
                i += 1;
                output_path = Some(value(args, i, "--output")?);
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(Some(Cli {
        config,
        output_path,
    }))
}

fn run(cli: Cli) -> Result<(), SelfPlayError> {
    let config = cli.config;
    let quiet = config.quiet;

    if !quiet {
        eprintln!(
            "Self-play: {} games on {}x{}, depth R{}/B{}, {} random plies, max {} plies, {} threads",
            config.num_games,
            config.geometry.rows,
            config.geometry.cols,
            config.red_depth,
            config.blue_depth,
            config.random_plies,
            config.max_plies,
            config.threads
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config)?;
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(1e-9) * 3600.0
        );
        eprintln!("{}", Summary::from_games(&games));
    }

    match cli.output_path {
        Some(path) => {
            let file = File::create(&path)?;
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)?;
            if !quiet {
                eprintln!("Wrote {} games to {}", games.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    init_logging(cli.config.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("selfplay failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N         Number of games to play (default: 10)");
    eprintln!("  --depth D         Search depth for both sides (default: 3)");
    eprintln!("  --red-depth D     Search depth for Red");
    eprintln!("  --blue-depth D    Search depth for Blue");
    eprintln!("  --threads N       Number of parallel threads (default: 4)");
    eprintln!("  --seed N          Random seed, 0 for entropy (default: 0)");
    eprintln!("  --max-plies N     Ply limit per game (default: 400)");
    eprintln!("  --random-plies N  Random opening plies (default: 2)");
    eprintln!("  --evaluator NAME  weighted, flat, territorial, or a feature name");
    eprintln!("  --config FILE     JSON config; later flags override it");
    eprintln!("  --output FILE     Output file path (default: stdout)");
    eprintln!("  --quiet           Suppress progress and summary output");
    eprintln!("  --help            Show this help");
}
