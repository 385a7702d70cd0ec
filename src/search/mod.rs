#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Generic state-space search.
//!
//! A problem is described once through the [`SearchProblem`] trait (and
//! [`InformedProblem`] when a heuristic is available); the strategies in this
//! module then work over any such description:
//!
//! - [`bfs::breadth_first`]: shallowest solution, FIFO frontier.
//! - [`dfs::depth_limited`] and [`dfs::iterative_deepening`]: depth-first with a
//!   depth cutoff.
//! - [`astar::a_star`]: best-first on `f = g + h`.
//!
//! Every strategy returns the solution (if any) together with [`SearchStats`].

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod problem;
pub mod stats;
mod tree;

pub use problem::{InformedProblem, SearchProblem, Solution, Successors};
pub use stats::SearchStats;
