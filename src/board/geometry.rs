//! Grid geometry: positions, neighbors, and critical mass.
//!
//! Everything here is a pure function of the grid dimensions. Neighbors are
//! always produced in the order up, down, left, right so that explosion
//! traces are reproducible.

use serde::{Deserialize, Serialize};

/// Rows on the standard board.
pub const STANDARD_ROWS: usize = 9;

/// Columns on the standard board.
pub const STANDARD_COLS: usize = 6;

/// Orthogonal offsets in the fixed neighbor order: up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A cell coordinate, `0 <= row < rows`, `0 <= col < cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Dimensions of a rectangular board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::STANDARD
    }
}

impl Geometry {
    /// The 9x6 board.
    pub const STANDARD: Geometry = Geometry {
        rows: STANDARD_ROWS,
        cols: STANDARD_COLS,
    };

    pub const fn new(rows: usize, cols: usize) -> Self {
        Geometry { rows, cols }
    }

    /// Number of cells on the board.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns true if `pos` lies on the board.
    #[inline]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Row-major index of an in-bounds position.
    #[inline]
    pub const fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    /// Position at a row-major index.
    #[inline]
    pub const fn position(&self, index: usize) -> Position {
        Position {
            row: index / self.cols,
            col: index % self.cols,
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cell_count()).map(move |i| self.position(i))
    }

    /// In-bounds orthogonal neighbors of `pos`, in the order up, down, left, right.
    pub fn neighbors(&self, pos: Position) -> Neighbors {
        let mut out = Neighbors {
            items: [pos; 4],
            len: 0,
            next: 0,
        };
        for (dr, dc) in DIRECTIONS {
            let (Some(r), Some(c)) = (
                pos.row.checked_add_signed(dr),
                pos.col.checked_add_signed(dc),
            ) else {
                continue;
            };
            let n = Position::new(r, c);
            if self.contains(n) {
                out.items[out.len] = n;
                out.len += 1;
            }
        }
        out
    }

    /// Number of in-bounds orthogonal neighbors; a cell explodes at this many orbs.
    #[inline]
    pub fn critical_mass(&self, pos: Position) -> u16 {
        let mut count = 0u16;
        if pos.row > 0 {
            count += 1;
        }
        if pos.row + 1 < self.rows {
            count += 1;
        }
        if pos.col > 0 {
            count += 1;
        }
        if pos.col + 1 < self.cols {
            count += 1;
        }
        count
    }

    /// Returns true for the four board corners.
    #[inline]
    pub fn is_corner(&self, pos: Position) -> bool {
        self.on_top_or_bottom(pos) && self.on_left_or_right(pos)
    }

    /// Returns true for border cells that are not corners.
    #[inline]
    pub fn is_edge(&self, pos: Position) -> bool {
        (self.on_top_or_bottom(pos) || self.on_left_or_right(pos)) && !self.is_corner(pos)
    }

    #[inline]
    fn on_top_or_bottom(&self, pos: Position) -> bool {
        pos.row == 0 || pos.row + 1 == self.rows
    }

    #[inline]
    fn on_left_or_right(&self, pos: Position) -> bool {
        pos.col == 0 || pos.col + 1 == self.cols
    }
}

/// Up to four neighbor positions, stored inline.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors {
    items: [Position; 4],
    len: usize,
    next: usize,
}

impl Iterator for Neighbors {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.next < self.len {
            let p = self.items[self.next];
            self.next += 1;
            Some(p)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Neighbors {}
