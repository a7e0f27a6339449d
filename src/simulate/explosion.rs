//! Chain-reaction propagation.
//!
//! Explosions are resolved with a breadth-first worklist seeded at the cell
//! that just received an orb. A position may be queued more than once; a
//! stale entry whose cell has already dropped below critical mass is
//! skipped. The number of explosions per move is capped, and exceeding the
//! cap is reported as `MoveError::ChainOverflow`.

use std::collections::VecDeque;

use crate::board::{Board, Cell, Geometry, Journal, Player, Position};

use super::MoveError;

/// Maximum explosions allowed while resolving a single move on `geometry`.
///
/// A terminating chain explodes each cell a bounded number of times, so
/// one full pass of every cell per cell is far beyond any legitimate chain.
pub fn explosion_limit(geometry: Geometry) -> u32 {
    let cells = geometry.cell_count().max(4) as u32;
    cells.saturating_mul(cells)
}

/// Resolves the chain reaction starting at `origin`, spreading orbs owned by
/// `player`. Returns the number of explosions performed.
///
/// Every overwritten cell is reported to `journal` before the write. On
/// `ChainOverflow` or `OrbOverflow` the board is left partially resolved.
pub fn explode<J: Journal>(
    board: &mut Board,
    origin: Position,
    player: Player,
    limit: u32,
    journal: &mut J,
) -> Result<u32, MoveError> {
    let geometry = board.geometry();
    let mut queue: VecDeque<Position> = VecDeque::with_capacity(geometry.cell_count());
    queue.push_back(origin);
    let mut explosions: u32 = 0;

    while let Some(pos) = queue.pop_front() {
        let idx = geometry.index(pos);
        let cell = board.cell_at(idx);
        let critical = geometry.critical_mass(pos);
        if cell.orbs < critical {
            continue;
        }

        if explosions >= limit {
            return Err(MoveError::ChainOverflow { origin, limit });
        }
        explosions += 1;

        journal.record(idx, cell);
        let remaining = cell.orbs - critical;
        *board.cell_at_mut(idx) = if remaining == 0 {
            Cell::EMPTY
        } else {
            Cell {
                orbs: remaining,
                owner: cell.owner,
            }
        };

        for n in geometry.neighbors(pos) {
            let ni = geometry.index(n);
            let prev = board.cell_at(ni);
            let orbs = prev
                .orbs
                .checked_add(1)
                .ok_or(MoveError::OrbOverflow { pos: n })?;
            journal.record(ni, prev);
            let next = Cell::owned(orbs, player);
            *board.cell_at_mut(ni) = next;
            if next.orbs >= geometry.critical_mass(n) {
                queue.push_back(n);
            }
        }
    }

    Ok(explosions)
}
