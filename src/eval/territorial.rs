//! Territorial blend evaluator.
//!
//! An alternate scoring function built from five differential terms:
//! raw orbs, position-weighted orbs, explosion potential, controlled cells,
//! and controlled corners, blended 0.3 / 0.2 / 0.3 / 0.1 / 0.1.
//!
//! A board on which one side has been wiped out scores `WIN_SCORE` for the
//! survivor and `-WIN_SCORE` for the loser. The evaluator sees no placement
//! history, so a side counts as wiped out only once the board holds at
//! least two orbs: one move by each player.

use crate::board::{Board, Player};

/// Score of a board won outright. Finite so that strict comparisons in the
/// search still pick a move when every option loses.
pub const WIN_SCORE: f64 = 1.0e9;

/// Per-player accumulators for the five terms.
#[derive(Default)]
struct Tally {
    orbs: f64,
    weighted_orbs: f64,
    potential: f64,
    cells: f64,
    corners: f64,
}

/// Territorial score for `player`.
pub fn score(board: &Board, player: Player) -> f64 {
    let geometry = board.geometry();
    let mut own = Tally::default();
    let mut other = Tally::default();

    for (i, cell) in board.cells().iter().enumerate() {
        if cell.is_empty() {
            continue;
        }
        let pos = geometry.position(i);
        let cm = geometry.critical_mass(pos);
        let tally = if cell.is_owned_by(player) {
            &mut own
        } else {
            &mut other
        };

        let orbs = cell.orbs as f64;
        let position_weight = match cm {
            2 => 2.0,
            3 => 1.5,
            _ => 1.0,
        };
        let mut potential = if cm > 0 { orbs / cm as f64 } else { 0.0 };
        if cell.orbs + 1 == cm {
            potential *= 1.5;
        }

        tally.orbs += orbs;
        tally.weighted_orbs += orbs * position_weight;
        tally.potential += potential;
        tally.cells += 1.0;
        if geometry.is_corner(pos) {
            tally.corners += 1.0;
        }
    }

    if own.orbs + other.orbs >= 2.0 {
        if other.orbs == 0.0 {
            return WIN_SCORE;
        }
        if own.orbs == 0.0 {
            return -WIN_SCORE;
        }
    }

    0.3 * (own.orbs - other.orbs)
        + 0.2 * (own.weighted_orbs - other.weighted_orbs)
        + 0.3 * (own.potential - other.potential)
        + 0.1 * (own.cells - other.cells)
        + 0.1 * (own.corners - other.corners)
}
