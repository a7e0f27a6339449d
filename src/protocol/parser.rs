//! Engine command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

use tracing::warn;

use crate::board::{Geometry, Player, Position};

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
}

/// A parsed engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Reset to an empty board, optionally with new dimensions.
    NewGame { geometry: Option<Geometry> },

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Set the board from `/`-separated rows of cell tokens.
    Position {
        rows: Vec<String>,
        to_move: Option<Player>,
    },

    /// Play a move for the side to move.
    Move(Position),

    /// Search the current position.
    Go(GoParams),

    /// Print the current game state.
    Show,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let (&name, _) = tokens.split_first()?;

    match name {
        "isready" => Some(Command::IsReady),
        "show" => Some(Command::Show),
        "quit" => Some(Command::Quit),

        "newgame" => parse_newgame(&tokens),
        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "move" => parse_move(&tokens),
        "go" => parse_go(&tokens),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `newgame [rows cols]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    match tokens {
        [_] => Some(Command::NewGame { geometry: None }),
        [_, rows, cols] => match (rows.parse::<usize>(), cols.parse::<usize>()) {
            (Ok(r), Ok(c)) if r > 0 && c > 0 => Some(Command::NewGame {
                geometry: Some(Geometry::new(r, c)),
            }),
            _ => {
                warn!(rows, cols, "invalid newgame dimensions");
                None
            }
        },
        _ => {
            warn!("malformed newgame: expected 'newgame [rows cols]'");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
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

/// Parses `position <row>/<row>/... [tomove R|B]`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    let args = &tokens[1..];
    let (cells, to_move) = match args.iter().position(|&t| t == "tomove") {
        Some(i) => {
            let player = match &args[i + 1..] {
                [p] => Player::from_name(p),
                _ => None,
            };
            match player {
                Some(p) => (&args[..i], Some(p)),
                None => {
                    warn!("malformed position: expected 'tomove R|B'");
                    return None;
                }
            }
        }
        None => (args, None),
    };

    if cells.is_empty() {
        warn!("malformed position: expected 'position <row>/<row>/...'");
        return None;
    }

    let joined = cells.join(" ");
    let rows = joined.split('/').map(|r| r.trim().to_string()).collect();
    Some(Command::Position { rows, to_move })
}

/// Parses `move <row> <col>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    match tokens {
        [_, row, col] => match (row.parse::<usize>(), col.parse::<usize>()) {
            (Ok(r), Ok(c)) => Some(Command::Move(Position::new(r, c))),
            _ => {
                warn!(row, col, "invalid move coordinates");
                None
            }
        },
        _ => {
            warn!("malformed move: expected 'move <row> <col>'");
            None
        }
    }
}

/// Parses `go [depth <n>]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<u32>() {
                        Ok(v) => params.depth = Some(v),
                        Err(_) => warn!(value = tokens[i], "invalid depth value"),
                    }
                }
            }
            other => warn!(param = other, "unknown go parameter"),
        }
        i += 1;
    }

    Some(Command::Go(params))
}
