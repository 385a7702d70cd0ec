#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Binary constraint satisfaction.
//!
//! A [`problem::Csp`] holds named variables, their finite domains and binary
//! constraints. [`backtracking::BacktrackingSolver`] assigns variables one at a
//! time, choosing them with [`heuristics::VariableOrdering`], ordering values
//! with [`heuristics::ValueOrdering`], and pruning the remaining domains with
//! [`ac3::Ac3`] after every assignment.

pub mod ac3;
pub mod backtracking;
pub mod heuristics;
pub mod map_coloring;
pub mod problem;
