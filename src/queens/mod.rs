#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The N-Queens problem solved three ways: exhaustive backtracking,
//! breadth-first search over partial placements, and min-conflicts local search.

use clap::ValueEnum;
use log::warn;
use std::fmt::Display;

pub mod backtracking;
pub mod bfs;
pub mod board;
pub mod min_conflicts;

/// Work done by one of the N-Queens solvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueensStats {
    /// Search nodes visited (backtracking and BFS).
    pub nodes: usize,
    /// Repair steps taken (min-conflicts).
    pub steps: usize,
    /// Random starts used (min-conflicts).
    pub restarts: usize,
}

/// Largest board the exhaustive solvers (backtracking and BFS) are run on.
pub const MAX_EXHAUSTIVE_N: usize = 12;

/// Which solver(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Method {
    /// Run all three in turn.
    #[default]
    All,
    /// Exhaustive backtracking; counts every solution.
    Backtracking,
    /// Breadth-first search over partial placements.
    Bfs,
    /// Min-conflicts local search with random restarts.
    MinConflicts,
}

/// One concrete N-Queens solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solver {
    /// See [`backtracking`].
    Backtracking,
    /// See [`bfs`].
    Bfs,
    /// See [`min_conflicts`].
    MinConflicts,
}

impl Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backtracking => write!(f, "Backtracking Search"),
            Self::Bfs => write!(f, "Breadth-First Search"),
            Self::MinConflicts => write!(f, "Min-Conflicts (Local Search)"),
        }
    }
}

impl Solver {
    /// Whether the solver's time or memory grows with the whole search tree.
    #[must_use]
    pub const fn is_exhaustive(self) -> bool {
        matches!(self, Self::Backtracking | Self::Bfs)
    }
}

impl Method {
    /// The concrete solvers this choice stands for.
    #[must_use]
    pub const fn solvers(self) -> &'static [Solver] {
        match self {
            Self::All => &[Solver::Backtracking, Solver::Bfs, Solver::MinConflicts],
            Self::Backtracking => &[Solver::Backtracking],
            Self::Bfs => &[Solver::Bfs],
            Self::MinConflicts => &[Solver::MinConflicts],
        }
    }

    /// The solvers to run on an `n × n` board. Above [`MAX_EXHAUSTIVE_N`]
    /// only min-conflicts is used.
    #[must_use]
    pub fn solvers_for(self, n: usize) -> &'static [Solver] {
        let solvers = self.solvers();
        if n > MAX_EXHAUSTIVE_N && solvers.iter().any(|s| s.is_exhaustive()) {
            warn!("{n}-queens is too large for exhaustive search; using min-conflicts");
            return &[Solver::MinConflicts];
        }
        solvers
    }
}
