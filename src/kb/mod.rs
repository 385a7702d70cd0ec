#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A family-tree knowledge base with a small query parser.

/// Parent facts, derived relations and the fact file format.
pub mod facts;
/// Query parsing and evaluation.
pub mod query;
