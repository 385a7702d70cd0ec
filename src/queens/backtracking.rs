//! Column-by-column backtracking with bit-vector occupancy.

use crate::queens::QueensStats;
use crate::queens::board::Placement;
use bit_vec::BitVec;
use log::debug;
use std::ops::ControlFlow;

/// Occupied rows and diagonals for the columns placed so far.
struct Backtracker {
    n: usize,
    rows: BitVec,
    /// Indexed by `row + col`.
    diagonals: BitVec,
    /// Indexed by `row + n - 1 - col`.
    anti_diagonals: BitVec,
    positions: Vec<usize>,
    nodes: usize,
}

impl Backtracker {
    fn new(n: usize) -> Self {
        let diagonals = (2 * n).saturating_sub(1);
        Self {
            n,
            rows: BitVec::from_elem(n, false),
            diagonals: BitVec::from_elem(diagonals, false),
            anti_diagonals: BitVec::from_elem(diagonals, false),
            positions: Vec::with_capacity(n),
            nodes: 0,
        }
    }

    fn is_free(&self, col: usize, row: usize) -> bool {
        let anti = row + self.n - 1 - col;
        !(self.rows[row] || self.diagonals[row + col] || self.anti_diagonals[anti])
    }

    fn mark(&mut self, col: usize, row: usize, value: bool) {
        let anti = row + self.n - 1 - col;
        self.rows.set(row, value);
        self.diagonals.set(row + col, value);
        self.anti_diagonals.set(anti, value);
    }

    /// Calls `visit` on every completion of the current prefix, rows in
    /// increasing order, until it returns `Break`.
    fn extend<F>(&mut self, visit: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&[usize]) -> ControlFlow<()>,
    {
        self.nodes += 1;
        let col = self.positions.len();
        if col == self.n {
            return visit(&self.positions);
        }
        for row in 0..self.n {
            if !self.is_free(col, row) {
                continue;
            }
            self.mark(col, row, true);
            self.positions.push(row);
            let flow = self.extend(visit);
            self.positions.pop();
            self.mark(col, row, false);
            flow?;
        }
        ControlFlow::Continue(())
    }
}

fn run<F>(n: usize, mut visit: F) -> QueensStats
where
    F: FnMut(&[usize]) -> ControlFlow<()>,
{
    let mut backtracker = Backtracker::new(n);
    let _ = backtracker.extend(&mut visit);
    QueensStats {
        nodes: backtracker.nodes,
        ..QueensStats::default()
    }
}

/// Every solution for an `n × n` board in lexicographic order.
#[must_use]
pub fn solve_all(n: usize) -> (Vec<Placement>, QueensStats) {
    let mut solutions = Vec::new();
    let stats = run(n, |rows| {
        solutions.push(Placement::new(rows.to_vec()));
        ControlFlow::Continue(())
    });
    debug!("backtracking: {} solutions for n = {n}", solutions.len());
    (solutions, stats)
}

/// The lexicographically first solution.
#[must_use]
pub fn first_solution(n: usize) -> (Option<Placement>, QueensStats) {
    let mut found = None;
    let stats = run(n, |rows| {
        found = Some(Placement::new(rows.to_vec()));
        ControlFlow::Break(())
    });
    (found, stats)
}

/// Number of solutions, without storing them.
#[must_use]
pub fn count_solutions(n: usize) -> usize {
    count_and_first(n).0
}

/// Counts every solution in one pass, keeping only the first.
#[must_use]
pub fn count_and_first(n: usize) -> (usize, Option<Placement>, QueensStats) {
    let mut count = 0;
    let mut first = None;
    let stats = run(n, |rows| {
        if count == 0 {
            first = Some(Placement::new(rows.to_vec()));
        }
        count += 1;
        ControlFlow::Continue(())
    });
    debug!("backtracking: {count} solutions for n = {n}");
    (count, first, stats)
}
