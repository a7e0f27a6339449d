//! Minimax with alpha-beta pruning.
//!
//! Every node is scored from the root player's fixed perspective: the
//! maximizing side is the root player, the minimizing side is the opponent
//! driving the same score down. Candidate moves are tried in row-major
//! order and the first move reaching the best score wins ties.
//!
//! The search runs on one scratch board. Each candidate move is applied
//! with an undo log, searched, and rolled back, so no mutation escapes the
//! branch that made it and the caller's board is never touched.

use crate::board::{Board, Player, Position, UndoLog};
use crate::eval::{evaluate, EvalConfig};
use crate::simulate::{evaluate_outcome, try_apply_move_with, MoveError, PlacementHistory};

use super::SearchResult;

/// Recursive alpha-beta state shared across one search.
pub(crate) struct AlphaBeta<'a> {
    eval: &'a EvalConfig,
    log: UndoLog,
    pub(crate) nodes: u64,
}

impl<'a> AlphaBeta<'a> {
    pub(crate) fn new(eval: &'a EvalConfig) -> Self {
        AlphaBeta {
            eval,
            log: UndoLog::with_capacity(256),
            nodes: 0,
        }
    }

    /// Applies `mv` for `mover`, searches the child, and restores `board`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn child(
        &mut self,
        board: &mut Board,
        history: PlacementHistory,
        mv: Position,
        mover: Player,
        depth: u32,
        alpha: f64,
        beta: f64,
        maximizing: bool,
        root: Player,
    ) -> Result<f64, MoveError> {
        let mark = self.log.mark();
        let result = match try_apply_move_with(board, mv, mover, &mut self.log) {
            Ok(_) => self.node(board, history, depth, alpha, beta, maximizing, root),
            Err(e) => Err(e),
        };
        self.log.rollback(board, mark);
        result.map(|(score, _)| score)
    }

    /// Searches `board` to `depth` plies and returns the score and the move
    /// that achieves it. `board` is restored before returning, also on error.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn node(
        &mut self,
        board: &mut Board,
        history: PlacementHistory,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        root: Player,
    ) -> Result<(f64, Option<Position>), MoveError> {
        self.nodes += 1;

        let mut history = history;
        let outcome = evaluate_outcome(board, &mut history);
        if depth == 0 || outcome.is_decided {
            return Ok((evaluate(board, root, self.eval), None));
        }

        let mover = if maximizing { root } else { root.opponent() };
        let moves = board.valid_moves(mover);
        if moves.is_empty() {
            return Ok((evaluate(board, root, self.eval), None));
        }

        let mut best_score = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for mv in moves {
            let score = self.child(
                board,
                history,
                mv,
                mover,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                root,
            )?;

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        Ok((best_score, best_move))
    }
}

/// Like `alpha_beta`, but reports an explosion-limit overflow anywhere in
/// the tree instead of panicking.
#[allow(clippy::too_many_arguments)]
pub fn try_alpha_beta(
    board: &Board,
    history: PlacementHistory,
    depth: u32,
    alpha: f64,
    beta: f64,
    maximizing: bool,
    root: Player,
    eval: &EvalConfig,
) -> Result<SearchResult, MoveError> {
    let mut scratch = board.clone();
    let mut searcher = AlphaBeta::new(eval);
    let (score, best_move) =
        searcher.node(&mut scratch, history, depth, alpha, beta, maximizing, root)?;
    debug_assert_eq!(&scratch, board);
    Ok(SearchResult {
        score,
        best_move,
        nodes: searcher.nodes,
    })
}

/// Runs alpha-beta from an explicit window and side, on a private copy of
/// `board`.
///
/// `history` is the game's placement history at `board`; each explored
/// branch works on its own copy of it.
///
/// Panics if a simulated move exceeds the explosion limit.
#[allow(clippy::too_many_arguments)]
pub fn alpha_beta(
    board: &Board,
    history: PlacementHistory,
    depth: u32,
    alpha: f64,
    beta: f64,
    maximizing: bool,
    root: Player,
    eval: &EvalConfig,
) -> SearchResult {
    match try_alpha_beta(board, history, depth, alpha, beta, maximizing, root, eval) {
        Ok(result) => result,
        Err(e) => panic!("explosion invariant violated during search: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Geometry};
    use crate::eval::Feature;

    fn pos(r: usize, c: usize) -> Position {
        Position::new(r, c)
    }

    fn full_window(
        board: &Board,
        history: PlacementHistory,
        depth: u32,
        root: Player,
        eval: &EvalConfig,
    ) -> SearchResult {
        alpha_beta(
            board,
            history,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
            root,
            eval,
        )
    }

    #[test]
    fn depth_zero_is_leaf_evaluation() {
        let mut board = Board::standard();
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        let eval = EvalConfig::default();
        let result = full_window(&board, PlacementHistory::from_board(&board), 0, Player::Red, &eval);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate(&board, Player::Red, &eval));
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn caller_board_is_untouched() {
        let mut board = Board::standard();
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        board.set_cell(pos(0, 1), Cell::owned(2, Player::Blue));
        let before = board.clone();
        let result = full_window(&board, PlacementHistory::both(), 2, Player::Red, &EvalConfig::default());
        assert!(result.best_move.is_some());
        assert!(result.nodes > 1);
        assert_eq!(board, before);
    }

    #[test]
    fn decided_board_is_terminal() {
        let mut board = Board::standard();
        board.set_cell(pos(4, 4), Cell::owned(2, Player::Red));
        let result = full_window(&board, PlacementHistory::both(), 3, Player::Blue, &EvalConfig::default());
        assert_eq!(result.best_move, None);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn takes_the_capturing_move() {
        // Exploding the primed corner at (0, 0) captures Blue's only cell.
        let mut board = Board::new(Geometry::new(3, 3));
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        board.set_cell(pos(0, 1), Cell::owned(1, Player::Blue));
        board.set_cell(pos(2, 2), Cell::owned(1, Player::Red));

        let eval = EvalConfig::single(Feature::OrbDifferential);
        let result = full_window(&board, PlacementHistory::both(), 1, Player::Red, &eval);
        assert_eq!(result.best_move, Some(pos(0, 0)));
        assert_eq!(result.score, 4.0);
    }

    #[test]
    fn ties_go_to_the_first_move() {
        // Every opening move on an empty board has the same orb differential.
        let board = Board::new(Geometry::new(3, 3));
        let eval = EvalConfig::single(Feature::OrbDifferential);
        let result = full_window(&board, PlacementHistory::new(), 1, Player::Red, &eval);
        assert_eq!(result.best_move, Some(pos(0, 0)));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn overflow_is_reported_and_board_restored() {
        // Every cell of a 2x2 board is one orb short; any placement sets
        // off a chain that never settles.
        let mut board = Board::new(Geometry::new(2, 2));
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        board.set_cell(pos(0, 1), Cell::owned(1, Player::Blue));
        board.set_cell(pos(1, 0), Cell::owned(1, Player::Blue));
        board.set_cell(pos(1, 1), Cell::owned(1, Player::Red));
        let err = try_alpha_beta(
            &board,
            PlacementHistory::both(),
            2,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
            Player::Red,
            &EvalConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MoveError::ChainOverflow { .. }));
    }

    #[test]
    #[should_panic(expected = "explosion invariant violated")]
    fn alpha_beta_panics_on_overflow() {
        let mut board = Board::new(Geometry::new(2, 2));
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Red));
        board.set_cell(pos(0, 1), Cell::owned(1, Player::Blue));
        board.set_cell(pos(1, 0), Cell::owned(1, Player::Blue));
        board.set_cell(pos(1, 1), Cell::owned(1, Player::Red));
        full_window(&board, PlacementHistory::both(), 1, Player::Red, &EvalConfig::default());
    }

    #[test]
    fn no_legal_moves_returns_no_move() {
        // Blue owns both cells; Red has nowhere to play.
        let mut board = Board::new(Geometry::new(1, 2));
        board.set_cell(pos(0, 0), Cell::owned(1, Player::Blue));
        board.set_cell(pos(0, 1), Cell::owned(1, Player::Blue));
        let eval = EvalConfig::default();
        let result = full_window(&board, PlacementHistory::new(), 2, Player::Red, &eval);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate(&board, Player::Red, &eval));
    }
}
