#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 8-puzzle: board representation and solvers.

/// Board state, moves, heuristics and parsing.
pub mod board;
/// The puzzle as a search problem and the strategy dispatcher.
pub mod solver;
