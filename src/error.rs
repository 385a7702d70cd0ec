//! Crate-wide error type.
//!
//! Each module that reads user input has its own error enum; this type wraps
//! them so front ends can propagate any failure with `?`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Any failure surfaced by the library or the command line front end.
#[derive(Debug, Error)]
pub enum Error {
    /// A file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory was expected.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Writing to the terminal or reading interactive input failed.
    #[error("terminal I/O failed: {0}")]
    Output(#[from] std::io::Error),

    /// An 8-puzzle could not be parsed.
    #[error("invalid puzzle: {0}")]
    Puzzle(#[from] crate::puzzle::board::PuzzleError),

    /// A Sudoku grid could not be parsed.
    #[error("invalid sudoku: {0}")]
    Sudoku(#[from] crate::sudoku::solver::SudokuError),

    /// A weighted graph description could not be parsed.
    #[error("invalid graph: {0}")]
    Graph(#[from] crate::graph::GraphError),

    /// A fact file could not be parsed.
    #[error("invalid fact base: {0}")]
    Facts(#[from] crate::kb::facts::FactsError),

    /// A knowledge-base query was not understood.
    #[error(transparent)]
    Query(#[from] crate::kb::query::QueryError),

    /// A Tic-Tac-Toe move was rejected.
    #[error("invalid move: {0}")]
    Move(#[from] crate::tictactoe::board::MoveError),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Reads a whole input file, attaching the path to any I/O error.
///
/// # Errors
///
/// If the file does not exist or cannot be read as UTF-8.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
