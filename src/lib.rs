#![deny(missing_docs)]
//! Classical AI search and reasoning algorithms: uninformed and informed
//! state-space search, constraint satisfaction, a small logical fact base,
//! adversarial search and local search.

/// Generic BFS, depth-limited DFS and A* over any [`search::SearchProblem`].
pub mod search;

/// The 8-puzzle board and its solvers.
pub mod puzzle;

/// Weighted graphs with heuristic estimates, searched with A*.
pub mod graph;

/// Binary constraint networks solved by backtracking with AC-3.
pub mod csp;

/// Sudoku as a constraint satisfaction problem.
pub mod sudoku;

/// A family-tree fact base and its query language.
pub mod kb;

/// Tic-Tac-Toe with a minimax opponent.
pub mod tictactoe;

/// N-Queens by backtracking, BFS and min-conflicts.
pub mod queens;

/// The crate-wide error type.
pub mod error;
