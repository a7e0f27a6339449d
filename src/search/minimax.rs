//! Plain minimax without pruning.
//!
//! Visits the full tree and copies the board at every node. Slow, but
//! simple enough to serve as the reference that alpha-beta must agree with.

use crate::board::{Board, Player, Position};
use crate::eval::{evaluate, EvalConfig};
use crate::simulate::{evaluate_outcome, try_apply_move, PlacementHistory};

use super::SearchResult;

/// Unpruned single-perspective minimax from `root`'s point of view.
pub fn minimax(
    board: &Board,
    history: PlacementHistory,
    depth: u32,
    maximizing: bool,
    root: Player,
    eval: &EvalConfig,
) -> SearchResult {
    let mut nodes = 0;
    let (score, best_move) = node(board, history, depth, maximizing, root, eval, &mut nodes);
    SearchResult {
        score,
        best_move,
        nodes,
    }
}

fn node(
    board: &Board,
    mut history: PlacementHistory,
    depth: u32,
    maximizing: bool,
    root: Player,
    eval: &EvalConfig,
    nodes: &mut u64,
) -> (f64, Option<Position>) {
    *nodes += 1;

    if depth == 0 || evaluate_outcome(board, &mut history).is_decided {
        return (evaluate(board, root, eval), None);
    }

    let mover = if maximizing { root } else { root.opponent() };
    let moves = board.valid_moves(mover);
    if moves.is_empty() {
        return (evaluate(board, root, eval), None);
    }

    let mut best: Option<(f64, Position)> = None;
    for mv in moves {
        let mut child = board.clone();
        if let Err(e) = try_apply_move(&mut child, mv, mover) {
            panic!("minimax hit a broken move at {mv} for {mover:?}: {e}");
        }
        let (score, _) = node(&child, history, depth - 1, !maximizing, root, eval, nodes);
        let better = match best {
            None => true,
            Some((s, _)) if maximizing => score > s,
            Some((s, _)) => score < s,
        };
        if better {
            best = Some((score, mv));
        }
    }

    match best {
        Some((score, mv)) => (score, Some(mv)),
        None => (evaluate(board, root, eval), None),
    }
}
