use crate::csp::backtracking::{BacktrackingConfig, BacktrackingSolver, CspStats};
use crate::csp::problem::Csp;
use crate::error::{self, Error};
use itertools::Itertools;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a grid is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SudokuError {
    /// The grid is not 4, 9, 16 or 25 rows tall.
    #[error("unsupported size {0}; expected 4, 9, 16 or 25 rows")]
    UnsupportedSize(usize),
    /// A row does not have as many cells as the grid has rows.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// 1-based row number.
        row: usize,
        /// Cells the row should have.
        expected: usize,
        /// Cells the row has.
        found: usize,
    },
    /// A cell is neither a number nor `.`.
    #[error("row {row}, column {col}: '{token}' is not a number")]
    InvalidCell {
        /// 1-based row number.
        row: usize,
        /// 1-based column number.
        col: usize,
        /// The offending token.
        token: String,
    },
    /// A cell holds a number larger than the grid size.
    #[error("row {row}, column {col}: {value} is out of range")]
    OutOfRange {
        /// 1-based row number.
        row: usize,
        /// 1-based column number.
        col: usize,
        /// The offending value.
        value: usize,
    },
}

/// Row-major cell values, 0 for empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    /// Wraps rows of cell values.
    #[must_use]
    pub const fn new(board: Vec<Vec<usize>>) -> Self {
        Self(board)
    }

    /// The rows of the grid.
    #[must_use]
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.0
    }

    /// The value at `row`, `col`; 0 when empty.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> usize {
        self.0[row][col]
    }
}

impl From<Vec<Vec<usize>>> for Board {
    fn from(board: Vec<Vec<usize>>) -> Self {
        Self::new(board)
    }
}

impl From<Board> for Vec<Vec<usize>> {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl<const N: usize> From<[[usize; N]; N]> for Board {
    fn from(board: [[usize; N]; N]) -> Self {
        Self::new(board.iter().map(|r| r.to_vec()).collect())
    }
}

/// A small puzzle for quick demos.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [[1, 0, 0, 4], [0, 0, 1, 0], [0, 1, 0, 3], [4, 0, 0, 1]];

/// The classic puzzle used in most textbook walkthroughs.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// Supported side lengths.
#[derive(Debug, Clone, PartialEq, Eq, Copy, PartialOrd, Ord, Hash)]
pub enum Size {
    /// 2×2 boxes.
    Four = 4,
    /// 3×3 boxes.
    Nine = 9,
    /// 4×4 boxes.
    Sixteen = 16,
    /// 5×5 boxes.
    TwentyFive = 25,
}

impl TryFrom<usize> for Size {
    type Error = SudokuError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            25 => Ok(Self::TwentyFive),
            _ => Err(SudokuError::UnsupportedSize(value)),
        }
    }
}

impl From<Size> for usize {
    fn from(size: Size) -> Self {
        match size {
            Size::Four => 4,
            Size::Nine => 9,
            Size::Sixteen => 16,
            Size::TwentyFive => 25,
        }
    }
}

impl Size {
    /// Side length of one box.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
            Self::TwentyFive => 5,
        }
    }
}

/// A grid whose shape and values have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    /// Cell values, 0 for empty.
    pub board: Board,
    /// Side length of the grid.
    pub size: Size,
}

impl Sudoku {
    /// Validates the shape and values of `board`.
    ///
    /// # Errors
    ///
    /// If the board is not square, has an unsupported size, or holds a value
    /// larger than its size.
    pub fn new(board: Board) -> Result<Self, SudokuError> {
        let size = Size::try_from(board.0.len())?;
        let n = usize::from(size);
        for (r, row) in board.0.iter().enumerate() {
            if row.len() != n {
                return Err(SudokuError::RaggedRow {
                    row: r + 1,
                    expected: n,
                    found: row.len(),
                });
            }
            if let Some(c) = row.iter().position(|&v| v > n) {
                return Err(SudokuError::OutOfRange {
                    row: r + 1,
                    col: c + 1,
                    value: row[c],
                });
            }
        }
        Ok(Self { board, size })
    }

    /// Side length of the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size.into()
    }

    /// Whether no cell is filled in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.board.0.iter().flatten().all(|&v| v == 0)
    }

    /// One variable per cell named `r{row}c{col}` (0-based), in row-major
    /// order. Givens get a singleton domain, empty cells `1..=n`. Cells that
    /// share a row, column or box must differ.
    #[must_use]
    pub fn to_csp(&self) -> Csp<usize> {
        let n = self.len();
        let block = self.size.block_size();
        let mut csp = Csp::new();

        for (r, row) in self.board.0.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let domain = if value == 0 {
                    (1..=n).collect()
                } else {
                    vec![value]
                };
                csp.add_variable(format!("r{r}c{c}"), domain);
            }
        }

        let cell = |r: usize, c: usize| r * n + c;
        for r in 0..n {
            csp.add_all_different(&(0..n).map(|c| cell(r, c)).collect_vec());
        }
        for c in 0..n {
            csp.add_all_different(&(0..n).map(|r| cell(r, c)).collect_vec());
        }
        for (br, bc) in (0..n).step_by(block).cartesian_product((0..n).step_by(block)) {
            let cells = (br..br + block)
                .cartesian_product(bc..bc + block)
                .map(|(r, c)| cell(r, c))
                .collect_vec();
            csp.add_all_different(&cells);
        }
        csp
    }

    /// Rebuilds a grid from CSP values in [`to_csp`](Self::to_csp) order.
    #[must_use]
    pub fn decode(&self, values: &[usize]) -> Self {
        let n = self.len();
        let board = values.chunks(n).map(<[usize]>::to_vec).collect();
        Self {
            board: Board::new(board),
            size: self.size,
        }
    }

    /// Solves the grid with backtracking search over [`to_csp`](Self::to_csp).
    #[must_use]
    pub fn solve(&self, config: BacktrackingConfig) -> (Option<Self>, CspStats) {
        let csp = self.to_csp();
        let mut solver = BacktrackingSolver::new(&csp, config);
        let solution = solver.solve().map(|values| self.decode(&values));
        (solution, *solver.stats())
    }

    /// Every cell is filled and every row, column and box holds `1..=n` once.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let n = self.len();
        let block = self.size.block_size();
        let complete = |cells: Vec<usize>| cells.into_iter().sorted().eq(1..=n);

        (0..n).all(|r| complete((0..n).map(|c| self.board.cell(r, c)).collect()))
            && (0..n).all(|c| complete((0..n).map(|r| self.board.cell(r, c)).collect()))
            && (0..n)
                .step_by(block)
                .cartesian_product((0..n).step_by(block))
                .all(|(br, bc)| {
                    complete(
                        (br..br + block)
                            .cartesian_product(bc..bc + block)
                            .map(|(r, c)| self.board.cell(r, c))
                            .collect(),
                    )
                })
    }

    /// Whether every given of `self` is kept in `solution`.
    #[must_use]
    pub fn agrees_with(&self, solution: &Self) -> bool {
        self.size == solution.size
            && self
                .board
                .0
                .iter()
                .flatten()
                .zip(solution.board.0.iter().flatten())
                .all(|(&given, &value)| given == 0 || given == value)
    }
}

impl Display for Sudoku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.len().to_string().len();
        let block = self.size.block_size();
        for (r, row) in self.board.0.iter().enumerate() {
            if r > 0 && r % block == 0 {
                writeln!(f)?;
            }
            let line = row
                .chunks(block)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|&v| {
                            if v == 0 {
                                format!("{:>width$}", ".")
                            } else {
                                format!("{v:>width$}")
                            }
                        })
                        .join(" ")
                })
                .join(" | ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn parse_cell(row: usize, col: usize, token: &str) -> Result<usize, SudokuError> {
    if token == "." || token == "_" {
        return Ok(0);
    }
    token.parse::<usize>().map_err(|_| SudokuError::InvalidCell {
        row,
        col,
        token: token.to_string(),
    })
}

impl FromStr for Sudoku {
    type Err = SudokuError;

    /// One row per line. Cells are separated by whitespace or commas; a row
    /// with no separators is read one character per cell (`53..7....`).
    /// `0`, `.` and `_` mark empty cells. Blank lines, `|` and `-` box
    /// separators and `#` comments are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Vec::new();
        for raw in s.lines() {
            let text = raw.split('#').next().unwrap_or_default().replace('|', " ");
            let text = text.trim();
            if text.is_empty() || text.chars().all(|c| c == '-' || c == '+' || c == ' ') {
                continue;
            }

            let row = board.len() + 1;
            let tokens: Vec<String> = if text.contains(|c: char| c.is_whitespace() || c == ',') {
                text.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|t| !t.is_empty())
                    .map(ToString::to_string)
                    .collect()
            } else {
                text.chars().map(String::from).collect()
            };

            let cells = tokens
                .iter()
                .enumerate()
                .map(|(c, token)| parse_cell(row, c + 1, token))
                .collect::<Result<Vec<_>, _>>()?;
            board.push(cells);
        }
        Self::new(Board::new(board))
    }
}

impl TryFrom<Board> for Sudoku {
    type Error = SudokuError;

    fn try_from(board: Board) -> Result<Self, Self::Error> {
        Self::new(board)
    }
}

impl From<Sudoku> for Board {
    fn from(sudoku: Sudoku) -> Self {
        sudoku.board
    }
}

/// Reads a Sudoku grid from a file (see [`Sudoku`]'s `FromStr`).
///
/// # Errors
///
/// If the file cannot be read or does not hold a valid grid.
pub fn parse_sudoku_file(path: &Path) -> error::Result<Sudoku> {
    let text = error::read_input(path)?;
    text.parse::<Sudoku>().map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NINE_SOLUTION: [[usize; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    #[test]
    fn test_csp_shape() {
        let sudoku = Sudoku::new(EXAMPLE_NINE.into()).unwrap();
        let csp = sudoku.to_csp();
        assert_eq!(csp.len(), 81);
        assert_eq!(csp.name(10), "r1c1");
        assert_eq!(csp.domains()[0], vec![5]);
        assert_eq!(csp.domains()[2], (1..=9).collect::<Vec<_>>());
        // Each cell sees 8 in its row, 8 in its column and 4 more in its box.
        assert!((0..81).all(|v| csp.neighbors(v).len() == 20));
    }

    #[test]
    fn test_solves_classic_puzzle() {
        let sudoku = Sudoku::new(EXAMPLE_NINE.into()).unwrap();
        let (solution, stats) = sudoku.solve(BacktrackingConfig::default());
        let solution = solution.unwrap();
        assert!(solution.is_solved());
        assert!(sudoku.agrees_with(&solution));
        assert_eq!(solution.board, Board::from(NINE_SOLUTION));
        assert!(stats.pruned_values > 0);
    }

    #[test]
    fn test_solves_four_by_four() {
        let sudoku = Sudoku::new(EXAMPLE_FOUR.into()).unwrap();
        let (solution, _) = sudoku.solve(BacktrackingConfig::default());
        let solution = solution.unwrap();
        assert!(solution.is_solved());
        assert!(sudoku.agrees_with(&solution));
    }

    #[test]
    fn test_conflicting_givens_have_no_solution() {
        let mut grid = EXAMPLE_FOUR;
        grid[0][1] = 1;
        let sudoku = Sudoku::new(grid.into()).unwrap();
        assert!(sudoku.solve(BacktrackingConfig::default()).0.is_none());
    }

    #[test]
    fn test_parse_formats() {
        let spaced = "5 3 0 0 7 0 0 0 0\n6 0 0 1 9 5 0 0 0\n0 9 8 0 0 0 0 6 0\n\
                      8 0 0 0 6 0 0 0 3\n4 0 0 8 0 3 0 0 1\n7 0 0 0 2 0 0 0 6\n\
                      0 6 0 0 0 0 2 8 0\n0 0 0 4 1 9 0 0 5\n0 0 0 0 8 0 0 7 9\n";
        let compact = "# classic\n53..7....\n6..195...\n.98....6.\n\n8...6...3\n4..8.3..1\n\
                       7...2...6\n.6....28.\n...419..5\n....8..79\n";
        let expected = Sudoku::new(EXAMPLE_NINE.into()).unwrap();
        assert_eq!(spaced.parse::<Sudoku>().unwrap(), expected);
        assert_eq!(compact.parse::<Sudoku>().unwrap(), expected);

        let four = "1 . | . 4\n. . | 1 .\n----+----\n. 1 | . 3\n4 . | . 1";
        assert_eq!(
            four.parse::<Sudoku>().unwrap(),
            Sudoku::new(EXAMPLE_FOUR.into()).unwrap()
        );
    }

    #[test]
    fn test_display_round_trips() {
        let sudoku = Sudoku::new(EXAMPLE_FOUR.into()).unwrap();
        let text = sudoku.to_string();
        assert_eq!(text.lines().next(), Some("1 . | . 4"));
        assert_eq!(text.parse::<Sudoku>().unwrap(), sudoku);
    }

    /// A complete grid built by shifting each row of `1..=n`.
    fn shifted(n: usize) -> Vec<Vec<usize>> {
        let block = Size::try_from(n).unwrap().block_size();
        (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| (block * (r % block) + r / block + c) % n + 1)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_sixteen_by_sixteen() {
        let full = Sudoku::new(Board::new(shifted(16))).unwrap();
        assert!(full.is_solved());
        let csp = full.to_csp();
        // 15 in the row, 15 in the column and 9 more in the 4x4 box.
        assert!((0..256).all(|v| csp.neighbors(v).len() == 39));

        let mut grid = shifted(16);
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if (r + c) % 3 == 0 {
                    *cell = 0;
                }
            }
        }
        let puzzle = Sudoku::new(Board::new(grid)).unwrap();
        let text = puzzle.to_string();
        assert_eq!(text.lines().next(), Some(" .  2  3  . |  5  6  .  8 |  9  . 11 12 |  . 14 15  ."));
        assert_eq!(text.parse::<Sudoku>().unwrap(), puzzle);

        let (solution, _) = puzzle.solve(BacktrackingConfig::default());
        let solution = solution.unwrap();
        assert!(solution.is_solved());
        assert!(puzzle.agrees_with(&solution));

        let empty = Sudoku::new(Board::new(vec![vec![0; 16]; 16])).unwrap();
        let (solution, _) = empty.solve(BacktrackingConfig::default());
        let solution = solution.unwrap();
        assert!(solution.is_solved());
        assert_eq!(solution.to_string().parse::<Sudoku>().unwrap(), solution);
    }

    #[test]
    fn test_twenty_five_by_twenty_five_shape() {
        let full = Sudoku::new(Board::new(shifted(25))).unwrap();
        assert!(full.is_solved());
        let csp = full.to_csp();
        assert_eq!(csp.len(), 625);
        assert!((0..625).all(|v| csp.neighbors(v).len() == 64));
    }

    #[test]
    fn test_sixteen_rejects_out_of_range_value() {
        let mut grid = shifted(16);
        grid[2][4] = 17;
        let text = grid.iter().map(|row| row.iter().join(" ")).join("\n");
        assert_eq!(
            text.parse::<Sudoku>(),
            Err(SudokuError::OutOfRange {
                row: 3,
                col: 5,
                value: 17
            })
        );
        grid[2][4] = 16;
        assert!(Sudoku::new(Board::new(grid)).is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1 2 3".parse::<Sudoku>(),
            Err(SudokuError::UnsupportedSize(1))
        );
        assert_eq!(
            "1 2 3 4\n1 2 3\n1 2 3 4\n1 2 3 4".parse::<Sudoku>(),
            Err(SudokuError::RaggedRow {
                row: 2,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            "1 2 3 4\n1 x 3 4".parse::<Sudoku>(),
            Err(SudokuError::InvalidCell {
                row: 2,
                col: 2,
                token: "x".to_string()
            })
        );
        assert_eq!(
            "1 2 3 4\n1 2 3 4\n1 2 3 4\n1 2 3 7".parse::<Sudoku>(),
            Err(SudokuError::OutOfRange {
                row: 4,
                col: 4,
                value: 7
            })
        );
    }
}
