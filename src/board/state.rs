//! Board state.
//!
//! A `Board` is a row-major grid of cells with a fixed geometry. It is
//! plain data: cloning it gives an independent board, which is how callers
//! explore hypothetical futures without touching the real game.

use super::cell::{Cell, Player};
use super::geometry::{Geometry, Neighbors, Position};

/// A rectangular grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    geometry: Geometry,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Board::new(Geometry::STANDARD)
    }
}

impl Board {
    /// Creates an empty board with the given dimensions.
    pub fn new(geometry: Geometry) -> Self {
        Board {
            geometry,
            cells: vec![Cell::EMPTY; geometry.cell_count()],
        }
    }

    /// Creates an empty 9x6 board.
    pub fn standard() -> Self {
        Board::default()
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.geometry.cols
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at `pos`.
    ///
    /// Panics if `pos` is off the board.
    #[inline]
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[self.geometry.index(pos)]
    }

    /// Returns the cell at `pos`, or `None` if it is off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.geometry.contains(pos) {
            Some(self.cell(pos))
        } else {
            None
        }
    }

    /// Overwrites a cell. Used when building positions directly.
    ///
    /// Panics if `pos` is off the board.
    pub fn set_cell(&mut self, pos: Position, cell: Cell) {
        let idx = self.geometry.index(pos);
        self.cells[idx] = cell;
    }

    #[inline]
    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        self.cells[index]
    }

    #[inline]
    pub(crate) fn cell_at_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    #[inline]
    pub fn critical_mass(&self, pos: Position) -> u16 {
        self.geometry.critical_mass(pos)
    }

    #[inline]
    pub fn neighbors(&self, pos: Position) -> Neighbors {
        self.geometry.neighbors(pos)
    }

    /// Sum of orbs on cells owned by `player`.
    pub fn total_orbs(&self, player: Player) -> u32 {
        self.cells
            .iter()
            .filter(|c| c.is_owned_by(player))
            .map(|c| c.orbs as u32)
            .sum()
    }

    /// Sum of all orbs on the board.
    pub fn orb_count(&self) -> u32 {
        self.cells.iter().map(|c| c.orbs as u32).sum()
    }

    /// Returns true if `player` may place an orb at `pos`.
    pub fn is_legal(&self, pos: Position, player: Player) -> bool {
        self.get(pos).is_some_and(|c| c.accepts(player))
    }

    /// Every position `player` may place on, scanned row-major.
    pub fn valid_moves(&self, player: Player) -> Vec<Position> {
        let mut moves = Vec::with_capacity(self.cells.len());
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.accepts(player) {
                moves.push(self.geometry.position(i));
            }
        }
        moves
    }

    /// Number of positions `player` may place on.
    pub fn valid_move_count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| c.accepts(player)).count()
    }

    /// Returns true if every cell satisfies the ownership invariant.
    pub fn is_consistent(&self) -> bool {
        self.cells
            .iter()
            .all(|c| (c.orbs == 0) == c.owner.is_none())
    }
}
