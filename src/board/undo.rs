//! Undo log for in-place search.
//!
//! The simulator reports every cell write to a `Journal`. Recording those
//! writes into an `UndoLog` lets the search apply a move to one scratch
//! board, recurse, and restore the exact previous state afterwards.

use super::cell::Cell;
use super::state::Board;

/// Receives the previous contents of each cell before it is overwritten.
pub trait Journal {
    fn record(&mut self, index: usize, previous: Cell);
}

/// A journal that discards everything.
pub struct NoJournal;

impl Journal for NoJournal {
    #[inline]
    fn record(&mut self, _index: usize, _previous: Cell) {}
}

/// Stack of overwritten cells, rolled back in reverse order.
#[derive(Debug, Default, Clone)]
pub struct UndoLog {
    entries: Vec<(usize, Cell)>,
}

impl UndoLog {
    pub fn new() -> Self {
        UndoLog::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        UndoLog {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Current log depth; pass it to `rollback` to undo everything after it.
    #[inline]
    pub fn mark(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Restores every cell written since `mark`, newest first.
    pub fn rollback(&mut self, board: &mut Board, mark: usize) {
        while self.entries.len() > mark {
            if let Some((idx, prev)) = self.entries.pop() {
                *board.cell_at_mut(idx) = prev;
            }
        }
    }

    /// Forgets every entry, committing the writes they recorded.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Journal for UndoLog {
    #[inline]
    fn record(&mut self, index: usize, previous: Cell) {
        self.entries.push((index, previous));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Player, Position};

    #[test]
    fn rollback_restores_in_reverse() {
        let mut board = Board::standard();
        let mut log = UndoLog::new();
        let idx = board.geometry().index(Position::new(2, 2));

        let mark = log.mark();
        log.record(idx, board.cell_at(idx));
        *board.cell_at_mut(idx) = Cell::owned(1, Player::Red);
        log.record(idx, board.cell_at(idx));
        *board.cell_at_mut(idx) = Cell::owned(2, Player::Red);

        assert_eq!(log.len(), 2);
        log.rollback(&mut board, mark);
        assert!(log.is_empty());
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn rollback_to_inner_mark_keeps_outer_writes() {
        let mut board = Board::standard();
        let mut log = UndoLog::new();
        let a = board.geometry().index(Position::new(0, 0));
        let b = board.geometry().index(Position::new(1, 1));

        log.record(a, board.cell_at(a));
        *board.cell_at_mut(a) = Cell::owned(1, Player::Blue);
        let inner = log.mark();
        log.record(b, board.cell_at(b));
        *board.cell_at_mut(b) = Cell::owned(1, Player::Red);

        log.rollback(&mut board, inner);
        assert_eq!(board.cell(Position::new(0, 0)), Cell::owned(1, Player::Blue));
        assert!(board.cell(Position::new(1, 1)).is_empty());
    }
}
