//! The 3×3 board, its scoring and move parsing.

use itertools::Itertools;
use std::fmt::Display;
use thiserror::Error;

/// Squares per row and column.
pub const SIDE: usize = 3;

/// Score of a board where the AI has a line.
pub const WIN_SCORE: i32 = 10;

/// The eight lines (rows, columns, diagonals) as cell indices.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Reasons a move is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The input was not two numbers.
    #[error("expected two numbers 'row col', found '{0}'")]
    Malformed(String),
    /// The square lies outside the board.
    #[error("({row}, {col}) is off the board; rows and columns run from 0 to 2")]
    OffBoard {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// The square already holds a mark.
    #[error("({row}, {col}) is already taken")]
    Occupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

/// A player's symbol. The human plays `X`, the AI plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    /// The human player.
    X,
    /// The AI player.
    O,
}

impl Mark {
    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

/// A 3×3 grid of optional marks, stored row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Option<Mark>; SIDE * SIDE],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [None; SIDE * SIDE],
        }
    }

    /// The mark at `row`, `col`, if any.
    #[must_use]
    pub const fn get(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells[row * SIDE + col]
    }

    /// Puts `mark` on `(row, col)`.
    ///
    /// # Errors
    ///
    /// If the square is off the board or already taken.
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), MoveError> {
        if row >= SIDE || col >= SIDE {
            return Err(MoveError::OffBoard { row, col });
        }
        let cell = &mut self.cells[row * SIDE + col];
        if cell.is_some() {
            return Err(MoveError::Occupied { row, col });
        }
        *cell = Some(mark);
        Ok(())
    }

    /// Empties `(row, col)`.
    pub(crate) const fn clear(&mut self, row: usize, col: usize) {
        self.cells[row * SIDE + col] = None;
    }

    /// Places `mark` without checks; the caller guarantees the square is empty.
    pub(crate) const fn set(&mut self, row: usize, col: usize, mark: Mark) {
        self.cells[row * SIDE + col] = Some(mark);
    }

    /// The mark owning a complete line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Some(mark) if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) => Some(mark),
            _ => None,
        })
    }

    /// `+10` if `O` has a line, `-10` if `X` has one, `0` otherwise.
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        match self.winner() {
            Some(Mark::O) => WIN_SCORE,
            Some(Mark::X) => -WIN_SCORE,
            None => 0,
        }
    }

    /// Whether any square is still empty.
    #[must_use]
    pub fn moves_left(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Empty squares in row-major order.
    pub fn empty_squares(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .positions(Option::is_none)
            .map(|idx| (idx / SIDE, idx % SIDE))
    }

    /// The game is over: someone won or the board is full.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || !self.moves_left()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.cells.chunks(SIDE).enumerate() {
            if r > 0 {
                writeln!(f, "---------")?;
            }
            let line = row
                .iter()
                .map(|cell| cell.map_or_else(|| "_".to_string(), |mark| mark.to_string()))
                .join(" | ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Reads a `row col` pair (0-based, whitespace or comma separated).
///
/// Only the format is checked here; range and occupancy are checked by
/// [`Board::place`].
///
/// # Errors
///
/// If the text is not exactly two non-negative integers.
pub fn parse_move(text: &str) -> Result<(usize, usize), MoveError> {
    let malformed = || MoveError::Malformed(text.trim().to_string());
    let numbers = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse::<usize>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| malformed())?;
    match numbers.as_slice() {
        [row, col] => Ok((*row, *col)),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    'X' => board.place(r, c, Mark::X).unwrap(),
                    'O' => board.place(r, c, Mark::O).unwrap(),
                    _ => {}
                }
            }
        }
        board
    }

    #[test]
    fn test_evaluate_lines() {
        assert_eq!(board(["OOO", "XX_", "___"]).evaluate(), 10);
        assert_eq!(board(["X_O", "XO_", "X__"]).evaluate(), -10);
        assert_eq!(board(["O_X", "_OX", "X_O"]).evaluate(), 10);
        assert_eq!(board(["O_X", "_XO", "X__"]).evaluate(), -10);
        assert_eq!(board(["XOX", "XOO", "OXX"]).evaluate(), 0);
        assert_eq!(Board::new().evaluate(), 0);
    }

    #[test]
    fn test_moves_left_and_empty_squares() {
        let full = board(["XOX", "XOO", "OXX"]);
        assert!(!full.moves_left());
        assert!(full.is_terminal());
        assert_eq!(full.empty_squares().count(), 0);

        let partial = board(["X__", "_O_", "__X"]);
        assert!(partial.moves_left());
        assert_eq!(
            partial.empty_squares().collect::<Vec<_>>(),
            vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn test_place_rejects_bad_squares() {
        let mut board = Board::new();
        board.place(1, 1, Mark::X).unwrap();
        assert_eq!(
            board.place(1, 1, Mark::O),
            Err(MoveError::Occupied { row: 1, col: 1 })
        );
        assert_eq!(
            board.place(3, 0, Mark::O),
            Err(MoveError::OffBoard { row: 3, col: 0 })
        );
        assert_eq!(board.get(1, 1), Some(Mark::X));
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("1 2"), Ok((1, 2)));
        assert_eq!(parse_move(" 0,2\n"), Ok((0, 2)));
        assert_eq!(parse_move("5 5"), Ok((5, 5)));
        assert_eq!(parse_move("1"), Err(MoveError::Malformed("1".to_string())));
        assert_eq!(parse_move("a b"), Err(MoveError::Malformed("a b".to_string())));
        assert_eq!(parse_move("1 2 3"), Err(MoveError::Malformed("1 2 3".to_string())));
        assert_eq!(parse_move("-1 0"), Err(MoveError::Malformed("-1 0".to_string())));
    }

    #[test]
    fn test_display() {
        let text = board(["X__", "_O_", "___"]).to_string();
        assert_eq!(text, "X | _ | _\n---------\n_ | O | _\n---------\n_ | _ | _\n");
    }
}
