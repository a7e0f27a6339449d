//! Game sessions.
//!
//! A `GameSession` owns everything that belongs to one game: the board, the
//! side to move, which players have ever placed an orb, and the outcome.
//! Separate sessions share nothing.

use crate::board::{Board, Geometry, Player, Position, UndoLog};
use crate::protocol::gamestate::{encode_board, GameState};
use crate::search::{search, try_search, SearchConfig, SearchResult};
use crate::simulate::{
    evaluate_outcome, try_apply_move_with, GameOutcome, MoveError, MoveReport, PlacementHistory,
};

/// Errors from playing a move in a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("game is already over ({winner:?} won)")]
    GameOver { winner: Option<Player> },

    #[error("{0}")]
    Move(#[from] MoveError),
}

/// A move played through a session, with what it caused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    pub player: Player,
    pub position: Position,
    pub explosions: u32,
    pub outcome: GameOutcome,
}

/// One game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    to_move: Player,
    history: PlacementHistory,
    outcome: GameOutcome,
    plies: u32,
    log: UndoLog,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new(Geometry::STANDARD)
    }
}

impl GameSession {
    /// Starts a game on an empty board. Red moves first.
    pub fn new(geometry: Geometry) -> Self {
        GameSession {
            board: Board::new(geometry),
            to_move: Player::Red,
            history: PlacementHistory::new(),
            outcome: GameOutcome::UNDECIDED,
            plies: 0,
            log: UndoLog::new(),
        }
    }

    /// Resumes a game from a board whose history is unknown. Players holding
    /// orbs count as having placed.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut history = PlacementHistory::from_board(&board);
        let outcome = evaluate_outcome(&board, &mut history);
        GameSession {
            board,
            to_move,
            history,
            outcome,
            plies: 0,
            log: UndoLog::new(),
        }
    }

    /// Resumes a game from a parsed text state, taking the side to move from
    /// its header.
    pub fn from_game_state(state: GameState) -> Self {
        let to_move = state.next_to_move();
        GameSession::from_board(state.board, to_move)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> PlacementHistory {
        self.history
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Number of moves played through this session.
    pub fn plies(&self) -> u32 {
        self.plies
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_decided
    }

    /// Plays `pos` for the side to move and passes the turn.
    ///
    /// Illegal moves and explosion-limit overflows leave the session
    /// unchanged.
    pub fn play(&mut self, pos: Position) -> Result<PlayedMove, PlayError> {
        if self.outcome.is_decided {
            return Err(PlayError::GameOver {
                winner: self.outcome.winner,
            });
        }

        let player = self.to_move;
        self.log.clear();
        let report: MoveReport =
            match try_apply_move_with(&mut self.board, pos, player, &mut self.log) {
                Ok(report) => report,
                Err(e) => {
                    self.log.rollback(&mut self.board, 0);
                    return Err(e.into());
                }
            };

        self.outcome = evaluate_outcome(&self.board, &mut self.history);
        self.to_move = player.opponent();
        self.plies += 1;

        Ok(PlayedMove {
            player,
            position: pos,
            explosions: report.explosions,
            outcome: self.outcome,
        })
    }

    /// Searches for the side to move without playing.
    pub fn best_move(&self, config: &SearchConfig) -> SearchResult {
        search(&self.board, self.history, self.to_move, config)
    }

    /// Searches for the side to move, reporting an explosion-limit overflow
    /// in the searched tree as an error.
    pub fn try_best_move(&self, config: &SearchConfig) -> Result<SearchResult, MoveError> {
        try_search(&self.board, self.history, self.to_move, config)
    }

    /// Searches for the side to move and plays the result. Returns `None`
    /// with the search result when there is no move to play.
    pub fn play_best(
        &mut self,
        config: &SearchConfig,
    ) -> Result<(SearchResult, Option<PlayedMove>), PlayError> {
        let result = self.try_best_move(config)?;
        match result.best_move {
            Some(pos) => Ok((result, Some(self.play(pos)?))),
            None => Ok((result, None)),
        }
    }

    /// The session as a text game state headed `<Color> to move`.
    pub fn game_state(&self) -> GameState {
        GameState::new(self.header(), self.board.clone())
    }

    /// Canonical text of the current position.
    pub fn to_text(&self) -> String {
        encode_board(&self.header(), &self.board)
    }

    fn header(&self) -> String {
        format!("{} to move", self.to_move.title())
    }
}
