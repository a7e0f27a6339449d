//! Engine state management.
//!
//! Holds the current game session and search options between commands, and
//! writes protocol replies for the engine binary.

use std::io::{self, Write};

use tracing::{error, info, warn};

use crate::board::{Geometry, Player, Position};
use crate::eval::EvalConfig;
use crate::game::{GameSession, PlayError};
use crate::protocol::gamestate::{parse_rows, GameStateError};
use crate::search::SearchConfig;

/// Errors from `setoption`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("unknown option '{0}'")]
    Unknown(String),

    #[error("option '{0}' needs a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub session: GameSession,
    pub config: SearchConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with an empty 9x6 game and default search options.
    pub fn new() -> Self {
        Engine {
            session: GameSession::default(),
            config: SearchConfig::default(),
        }
    }

    /// Starts a new game, keeping the current dimensions unless given.
    pub fn new_game(&mut self, geometry: Option<Geometry>) {
        let geometry = geometry.unwrap_or_else(|| self.session.board().geometry());
        self.session = GameSession::new(geometry);
    }

    /// Replaces the game with the position given as rows of cell tokens.
    /// The side to move defaults to Red.
    pub fn set_position<S: AsRef<str>>(
        &mut self,
        rows: &[S],
        to_move: Option<Player>,
    ) -> Result<(), GameStateError> {
        let board = parse_rows(rows.iter().map(AsRef::as_ref), 1)?;
        self.session = GameSession::from_board(board, to_move.unwrap_or(Player::Red));
        Ok(())
    }

    /// Sets an engine option: `Depth`, `Evaluator`, `Symmetric`, or `Parallel`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionError> {
        let value = value.ok_or_else(|| OptionError::MissingValue(name.to_string()))?;
        let invalid = || OptionError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        match name.to_ascii_lowercase().as_str() {
            "depth" => {
                self.config.depth = value.parse().map_err(|_| invalid())?;
            }
            "evaluator" => {
                let symmetric = self.config.eval.symmetric;
                let eval = EvalConfig::from_name(value).ok_or_else(invalid)?;
                self.config.eval = eval.with_symmetric(symmetric);
            }
            "symmetric" => {
                self.config.eval.symmetric = parse_flag(value).ok_or_else(invalid)?;
            }
            "parallel" => {
                self.config.parallel = parse_flag(value).ok_or_else(invalid)?;
            }
            _ => return Err(OptionError::Unknown(name.to_string())),
        }
        info!(option = name, value, "option set");
        Ok(())
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `move`: plays for the side to move and replies `ok`,
    /// `illegal`, or `gameover <winner>`.
    pub fn handle_move<W: Write>(&mut self, pos: Position, out: &mut W) -> io::Result<()> {
        match self.session.play(pos) {
            Ok(played) => match played.outcome.winner {
                Some(winner) => writeln!(out, "gameover {}", winner.symbol())?,
                None => writeln!(out, "ok")?,
            },
            Err(PlayError::Move(e)) if !e.is_illegal_move() => {
                error!(%e, "move aborted");
                writeln!(out, "illegal")?;
            }
            Err(e) => {
                warn!(%e, "move rejected");
                writeln!(out, "illegal")?;
            }
        }
        out.flush()
    }

    /// Handles `go`: searches the current position and replies with an
    /// `info` line and `bestmove`. The move is not played.
    pub fn handle_go<W: Write>(&self, depth: Option<u32>, out: &mut W) -> io::Result<()> {
        let mut config = self.config;
        if let Some(d) = depth {
            config.depth = d;
        }

        let result = match self.session.try_best_move(&config) {
            Ok(result) => result,
            Err(e) => {
                error!(%e, "search aborted");
                writeln!(out, "bestmove none")?;
                return out.flush();
            }
        };
        writeln!(
            out,
            "info depth {} nodes {} score {}",
            config.depth, result.nodes, result.score
        )?;
        match result.best_move {
            Some(p) => writeln!(out, "bestmove {} {}", p.row, p.col)?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }

    /// Handles `show`: writes the canonical text of the current position.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.session.to_text())?;
        out.flush()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Some(true),
        "false" | "off" | "0" | "no" => Some(false),
        _ => None,
    }
}
