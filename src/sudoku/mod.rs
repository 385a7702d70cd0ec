#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// Grid parsing, validation and the translation into a constraint problem.
pub mod solver;
