//! Text game-state format.
//!
//! A game state is a free-text header line followed by one line per board
//! row. Each row holds one whitespace-separated token per cell: `0` for an
//! empty cell, otherwise the orb count followed by the owner symbol
//! (`3R`, `1B`).
//!
//! ```text
//! Human Move:
//! 0 0 1R
//! 2B 0 0
//! ```
//!
//! Encoding is canonical (single spaces, every line ends in `\n`) so that
//! parsing and re-encoding canonical text reproduces it byte for byte.

use crate::board::{Board, Cell, Geometry, Player, Position};

/// Header written after a human move; the AI side (Blue) moves next.
pub const HUMAN_MOVE_HEADER: &str = "Human Move:";

/// Header written after an AI move; the human side (Red) moves next.
pub const AI_MOVE_HEADER: &str = "AI Move:";

/// Largest orb count a cell token may carry.
pub const MAX_CELL_ORBS: u16 = 999;

/// Corrupt or mismatched game-state text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameStateError {
    #[error("corrupt state: missing header line")]
    MissingHeader,

    #[error("corrupt state: no board rows")]
    EmptyBoard,

    #[error("corrupt state: line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("corrupt state: line {line}: invalid cell token '{token}'")]
    BadToken { line: usize, token: String },

    #[error("corrupt state: line {line}: unknown owner in '{token}'")]
    UnknownOwner { line: usize, token: String },

    #[error("corrupt state: line {line}: owned cell with zero orbs '{token}'")]
    ZeroOrbs { line: usize, token: String },

    #[error("corrupt state: line {line}: '{token}' holds more than {} orbs", MAX_CELL_ORBS)]
    TooManyOrbs { line: usize, token: String },

    #[error("board is {found_rows}x{found_cols}, expected {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
}

/// A header line plus the board it describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub header: String,
    pub board: Board,
}

impl GameState {
    pub fn new(header: impl Into<String>, board: Board) -> Self {
        GameState {
            header: header.into(),
            board,
        }
    }

    /// The player whose turn follows this state.
    pub fn next_to_move(&self) -> Player {
        next_to_move(&self.header)
    }
}

/// Side to move after a state carrying `header`.
///
/// A `<Color> to move` header names the side directly (any case). Otherwise
/// Blue moves after a human move and Red after anything else.
pub fn next_to_move(header: &str) -> Player {
    let header = header.trim();
    if header == HUMAN_MOVE_HEADER {
        return Player::Blue;
    }
    let mut words = header.split_whitespace();
    match (words.next(), words.next(), words.next(), words.next()) {
        (Some(color), Some(to), Some(mv), None)
            if to.eq_ignore_ascii_case("to") && mv.eq_ignore_ascii_case("move") =>
        {
            Player::from_name(color).unwrap_or(Player::Red)
        }
        _ => Player::Red,
    }
}

/// Parses one cell token. `line` is only used for error reporting.
pub fn parse_cell(token: &str, line: usize) -> Result<Cell, GameStateError> {
    let bad = || GameStateError::BadToken {
        line,
        token: token.to_string(),
    };

    if token == "0" {
        return Ok(Cell::EMPTY);
    }

    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(bad());
    }
    let (count, rest) = token.split_at(digits);
    // Canonical counts have no leading zero.
    if count.len() > 1 && count.starts_with('0') {
        return Err(bad());
    }
    let too_many = || GameStateError::TooManyOrbs {
        line,
        token: token.to_string(),
    };
    let orbs: u16 = count.parse().map_err(|_| too_many())?;
    if orbs > MAX_CELL_ORBS {
        return Err(too_many());
    }

    let mut symbols = rest.chars();
    let owner = match (symbols.next(), symbols.next()) {
        (Some(c), None) => Player::from_symbol(c).ok_or_else(|| GameStateError::UnknownOwner {
            line,
            token: token.to_string(),
        })?,
        (None, _) => return Err(bad()),
        (Some(_), Some(_)) => {
            return Err(GameStateError::UnknownOwner {
                line,
                token: token.to_string(),
            })
        }
    };

    if orbs == 0 {
        return Err(GameStateError::ZeroOrbs {
            line,
            token: token.to_string(),
        });
    }
    Ok(Cell::owned(orbs, owner))
}

/// Appends the token for `cell` to `out`.
pub fn encode_cell(cell: Cell, out: &mut String) {
    match cell.owner {
        Some(owner) if cell.orbs > 0 => {
            out.push_str(&cell.orbs.to_string());
            out.push(owner.symbol());
        }
        _ => out.push('0'),
    }
}

/// Builds a board from row strings, each a list of whitespace-separated
/// cell tokens. `first_line` is the line number of the first row.
pub fn parse_rows<'a, I>(rows: I, first_line: usize) -> Result<Board, GameStateError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cells: Vec<Cell> = Vec::new();
    let mut cols = 0;
    let mut row_count = 0;

    for (i, row) in rows.into_iter().enumerate() {
        let line = first_line + i;
        let start = cells.len();
        for token in row.split_whitespace() {
            cells.push(parse_cell(token, line)?);
        }
        let found = cells.len() - start;
        if i == 0 {
            if found == 0 {
                return Err(GameStateError::EmptyBoard);
            }
            cols = found;
        } else if found != cols {
            return Err(GameStateError::RaggedRow {
                line,
                expected: cols,
                found,
            });
        }
        row_count += 1;
    }

    if row_count == 0 {
        return Err(GameStateError::EmptyBoard);
    }

    let geometry = Geometry::new(row_count, cols);
    let mut board = Board::new(geometry);
    for (i, cell) in cells.into_iter().enumerate() {
        board.set_cell(geometry.position(i), cell);
    }
    Ok(board)
}

/// Parses a full game-state text.
///
/// Accepts `\r\n` line endings, a missing final newline, and trailing blank
/// lines. Geometry is taken from the text.
pub fn parse_game_state(text: &str) -> Result<GameState, GameStateError> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    while lines.len() > 1 && lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let (header, rows) = match lines.split_first() {
        Some((header, rows)) if !text.is_empty() => (*header, rows),
        _ => return Err(GameStateError::MissingHeader),
    };

    let board = parse_rows(rows.iter().copied(), 2)?;
    Ok(GameState::new(header, board))
}

/// Parses a game state that must have the given geometry.
pub fn parse_game_state_with(
    text: &str,
    geometry: Geometry,
) -> Result<GameState, GameStateError> {
    let state = parse_game_state(text)?;
    let found = state.board.geometry();
    if found != geometry {
        return Err(GameStateError::DimensionMismatch {
            rows: geometry.rows,
            cols: geometry.cols,
            found_rows: found.rows,
            found_cols: found.cols,
        });
    }
    Ok(state)
}

/// Encodes `state` canonically.
pub fn encode_game_state(state: &GameState) -> String {
    encode_board(&state.header, &state.board)
}

/// Encodes `board` under `header` canonically.
pub fn encode_board(header: &str, board: &Board) -> String {
    let mut out = String::with_capacity(header.len() + 1 + board.cells().len() * 3);
    out.push_str(header);
    out.push('\n');
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if col > 0 {
                out.push(' ');
            }
            encode_cell(board.cell(Position::new(row, col)), &mut out);
        }
        out.push('\n');
    }
    out
}
