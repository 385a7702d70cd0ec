#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Tic-Tac-Toe against a minimax opponent.

pub mod board;
pub mod game;
pub mod minimax;
