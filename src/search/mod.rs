//! Move search.
//!
//! Depth-limited minimax with alpha-beta pruning over simulated futures,
//! scored by the heuristic evaluator from the moving player's perspective.
//! The root can optionally be split across a rayon pool.

pub mod alphabeta;
pub mod minimax;

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{Board, Player, Position};
use crate::eval::{evaluate, EvalConfig};
use crate::simulate::{evaluate_outcome, MoveError, PlacementHistory};

pub use alphabeta::{alpha_beta, try_alpha_beta};
pub use minimax::minimax;

use alphabeta::AlphaBeta;

/// Search depth used when none is configured.
pub const DEFAULT_DEPTH: u32 = 3;

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    pub eval: EvalConfig,
    /// Search root moves concurrently.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            eval: EvalConfig::default(),
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

/// Result of a search: the chosen move, its score, and the nodes visited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub score: f64,
    pub best_move: Option<Position>,
    pub nodes: u64,
}

/// Finds the best move for `player` on `board`.
///
/// `history` is the game's placement history at `board`. The board is not
/// modified. Returns no move when the game is already decided, the depth is
/// zero, or `player` has no legal move.
///
/// Panics if a simulated move exceeds the explosion limit.
pub fn search(
    board: &Board,
    history: PlacementHistory,
    player: Player,
    config: &SearchConfig,
) -> SearchResult {
    match try_search(board, history, player, config) {
        Ok(result) => result,
        Err(e) => panic!("explosion invariant violated during search: {e}"),
    }
}

/// Like `search`, but returns `MoveError::ChainOverflow` when a simulated
/// move exceeds the explosion limit.
pub fn try_search(
    board: &Board,
    history: PlacementHistory,
    player: Player,
    config: &SearchConfig,
) -> Result<SearchResult, MoveError> {
    let start = Instant::now();
    let result = if config.parallel && config.depth > 0 {
        parallel_root(board, history, player, config)
    } else {
        try_alpha_beta(
            board,
            history,
            config.depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
            player,
            &config.eval,
        )
    };
    match &result {
        Ok(r) => debug!(
            player = player.name(),
            depth = config.depth,
            nodes = r.nodes,
            score = r.score,
            best = ?r.best_move,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        ),
        Err(e) => warn!(player = player.name(), depth = config.depth, %e, "search aborted"),
    }
    result
}

/// Searches each root move on its own board copy across the rayon pool.
///
/// Every root child gets a full window, so its score is exact and the
/// first-best selection below matches the sequential search.
fn parallel_root(
    board: &Board,
    history: PlacementHistory,
    player: Player,
    config: &SearchConfig,
) -> Result<SearchResult, MoveError> {
    let mut root_history = history;
    if evaluate_outcome(board, &mut root_history).is_decided {
        return Ok(leaf(board, player, &config.eval));
    }
    let moves = board.valid_moves(player);
    if moves.is_empty() {
        return Ok(leaf(board, player, &config.eval));
    }

    let scored: Vec<(f64, u64)> = moves
        .par_iter()
        .map(|&mv| -> Result<(f64, u64), MoveError> {
            let mut scratch = board.clone();
            let mut searcher = AlphaBeta::new(&config.eval);
            let score = searcher.child(
                &mut scratch,
                root_history,
                mv,
                player,
                config.depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
                player,
            )?;
            Ok((score, searcher.nodes))
        })
        .collect::<Result<_, MoveError>>()?;

    let mut best_score = f64::NEG_INFINITY;
    let mut best_move = None;
    let mut nodes = 1;
    for (&mv, &(score, n)) in moves.iter().zip(&scored) {
        nodes += n;
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }
    Ok(SearchResult {
        score: best_score,
        best_move,
        nodes,
    })
}

fn leaf(board: &Board, player: Player, eval: &EvalConfig) -> SearchResult {
    SearchResult {
        score: evaluate(board, player, eval),
        best_move: None,
        nodes: 1,
    }
}
