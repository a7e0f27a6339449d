//! chain-reaction -- a Chain Reaction engine driven over stdin/stdout.
//!
//! This binary reads one command per line from stdin and writes responses
//! to stdout. Diagnostics go to stderr through `tracing`; set `RUST_LOG` to
//! change the level.

use std::io::{self, BufRead, Write};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use chain_reaction::engine::Engine;
use chain_reaction::protocol::parser::{parse_command, Command};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Runs the protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    init_logging();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::NewGame { geometry } => engine.new_game(geometry),
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    warn!(%e, "setoption ignored");
                }
            }
            Command::Position { rows, to_move } => {
                if let Err(e) = engine.set_position(&rows, to_move) {
                    warn!(%e, "position ignored");
                }
            }
            Command::Move(pos) => engine.handle_move(pos, &mut out)?,
            Command::Go(params) => engine.handle_go(params.depth, &mut out)?,
            Command::Show => engine.handle_show(&mut out)?,
            Command::Quit => break,
        }
    }

    out.flush()
}
