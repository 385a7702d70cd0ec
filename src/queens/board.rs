//! Queen placements, one queen per column.

use itertools::Itertools;
use std::fmt::Display;

/// `rows[col]` is the row of the queen in column `col`.
///
/// A placement may be partial: columns `rows.len()..n` are still empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Placement {
    rows: Vec<usize>,
}

const fn attacks(c1: usize, r1: usize, c2: usize, r2: usize) -> bool {
    r1 == r2 || r1.abs_diff(r2) == c1.abs_diff(c2)
}

impl Placement {
    /// Queens at `rows[col]` for each column `col`.
    #[must_use]
    pub const fn new(rows: Vec<usize>) -> Self {
        Self { rows }
    }

    /// The row of each placed queen, by column.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of placed queens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no queen is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A queen at `(col, row)` would not be attacked by any placed queen.
    #[must_use]
    pub fn is_safe(&self, col: usize, row: usize) -> bool {
        self.rows
            .iter()
            .enumerate()
            .all(|(c, &r)| c == col || !attacks(c, r, col, row))
    }

    /// Queens (other than the one in `col`) attacking `(col, row)`.
    #[must_use]
    pub fn conflicts_for(&self, col: usize, row: usize) -> usize {
        self.rows
            .iter()
            .enumerate()
            .filter(|&(c, &r)| c != col && attacks(c, r, col, row))
            .count()
    }

    /// Columns whose queen is attacked.
    #[must_use]
    pub fn conflicted_columns(&self) -> Vec<usize> {
        (0..self.rows.len())
            .filter(|&col| self.conflicts_for(col, self.rows[col]) > 0)
            .collect()
    }

    /// `n` queens on an `n × n` board, none attacking another.
    #[must_use]
    pub fn is_solution(&self, n: usize) -> bool {
        self.rows.len() == n
            && self.rows.iter().all(|&r| r < n)
            && self.conflicted_columns().is_empty()
    }

    pub(crate) fn set(&mut self, col: usize, row: usize) {
        self.rows[col] = row;
    }
}

impl From<Vec<usize>> for Placement {
    fn from(rows: Vec<usize>) -> Self {
        Self::new(rows)
    }
}

impl Display for Placement {
    /// One board row per line, `Q` for a queen and `.` for an empty square.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.rows.len();
        for r in 0..n {
            let line = self
                .rows
                .iter()
                .map(|&row| if row == r { "Q" } else { "." })
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
