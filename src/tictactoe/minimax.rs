//! Game-tree search for the AI player (`O`).
//!
//! Scores are from `O`'s point of view: a win is worth `10 - depth`, a loss
//! `depth - 10`, so quicker wins and slower losses are preferred.

use crate::tictactoe::board::{Board, Mark, WIN_SCORE};
use clap::ValueEnum;
use log::debug;
use std::fmt::Display;

/// How the AI searches the game tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Strategy {
    /// Full minimax over the game tree.
    Minimax,
    /// Minimax with alpha-beta pruning; picks the same moves, visits fewer nodes.
    #[default]
    AlphaBeta,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minimax => write!(f, "minimax"),
            Self::AlphaBeta => write!(f, "alpha-beta"),
        }
    }
}

/// Work done by a [`Minimax`] player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimaxStats {
    /// Positions evaluated, the root's children included.
    pub nodes: usize,
}

/// The AI player. Node counts accumulate across searches.
#[derive(Debug, Clone, Default)]
pub struct Minimax {
    strategy: Strategy,
    stats: MinimaxStats,
}

impl Minimax {
    /// A player using `strategy`.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            stats: MinimaxStats::default(),
        }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> &MinimaxStats {
        &self.stats
    }

    /// The best square for `O`, scanning empty squares row by row and
    /// keeping the first one with the strictly highest score.
    ///
    /// Returns `None` if the board is full.
    pub fn best_move(&mut self, board: &Board) -> Option<(usize, usize)> {
        let mut board = *board;
        let mut best: Option<((usize, usize), i32)> = None;

        for (row, col) in board.empty_squares().collect::<Vec<_>>() {
            board.set(row, col, Mark::O);
            let value = match self.strategy {
                Strategy::Minimax => self.minimax(&mut board, 0, false),
                Strategy::AlphaBeta => {
                    let alpha = best.map_or(i32::MIN, |(_, value)| value);
                    self.alpha_beta(&mut board, 0, false, alpha, i32::MAX)
                }
            };
            board.clear(row, col);

            if best.is_none_or(|(_, best_value)| value > best_value) {
                best = Some(((row, col), value));
            }
        }

        if let Some(((row, col), value)) = best {
            debug!(
                "{} picks ({row}, {col}) with value {value} after {} nodes",
                self.strategy, self.stats.nodes
            );
        }
        best.map(|(square, _)| square)
    }

    /// Terminal score for `board` at `depth`, or `None` if play continues.
    fn terminal(board: &Board, depth: i32) -> Option<i32> {
        match board.evaluate() {
            WIN_SCORE => Some(WIN_SCORE - depth),
            score if score == -WIN_SCORE => Some(depth - WIN_SCORE),
            _ if !board.moves_left() => Some(0),
            _ => None,
        }
    }

    /// Value of `board` with `O` to move when `maximizing`, `X` otherwise.
    pub fn minimax(&mut self, board: &mut Board, depth: i32, maximizing: bool) -> i32 {
        self.stats.nodes += 1;
        if let Some(score) = Self::terminal(board, depth) {
            return score;
        }

        let mark = if maximizing { Mark::O } else { Mark::X };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for (row, col) in board.empty_squares().collect::<Vec<_>>() {
            board.set(row, col, mark);
            let value = self.minimax(board, depth + 1, !maximizing);
            board.clear(row, col);
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }

    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;
        if let Some(score) = Self::terminal(board, depth) {
            return score;
        }

        let mark = if maximizing { Mark::O } else { Mark::X };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for (row, col) in board.empty_squares().collect::<Vec<_>>() {
            board.set(row, col, mark);
            let value = self.alpha_beta(board, depth + 1, !maximizing, alpha, beta);
            board.clear(row, col);
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Convenience wrapper for a single decision.
#[must_use]
pub fn best_move(board: &Board, strategy: Strategy) -> (Option<(usize, usize)>, MinimaxStats) {
    let mut searcher = Minimax::new(strategy);
    let square = searcher.best_move(board);
    (square, *searcher.stats())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                match ch {
                    'X' => board.place(r, c, Mark::X).unwrap(),
                    'O' => board.place(r, c, Mark::O).unwrap(),
                    _ => {}
                }
            }
        }
        board
    }

    #[test]
    fn test_takes_the_win() {
        let position = board(["OO_", "XX_", "X__"]);
        for strategy in [Strategy::Minimax, Strategy::AlphaBeta] {
            assert_eq!(best_move(&position, strategy).0, Some((0, 2)), "{strategy}");
        }
    }

    #[test]
    fn test_blocks_the_loss() {
        let position = board(["XX_", "_O_", "___"]);
        for strategy in [Strategy::Minimax, Strategy::AlphaBeta] {
            assert_eq!(best_move(&position, strategy).0, Some((0, 2)), "{strategy}");
        }
    }

    #[test]
    fn test_full_board_has_no_move() {
        let full = board(["XOX", "XOO", "OXX"]);
        assert_eq!(best_move(&full, Strategy::Minimax).0, None);
    }

    #[test]
    fn test_terminal_scores_prefer_fast_wins() {
        let mut searcher = Minimax::new(Strategy::Minimax);
        let mut won = board(["OOO", "XX_", "___"]);
        assert_eq!(searcher.minimax(&mut won, 2, true), 8);
        let mut lost = board(["XXX", "OO_", "___"]);
        assert_eq!(searcher.minimax(&mut lost, 3, true), -7);
        let mut drawn = board(["XOX", "XOO", "OXX"]);
        assert_eq!(searcher.minimax(&mut drawn, 5, false), 0);
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut searcher = Minimax::new(Strategy::Minimax);
        assert_eq!(searcher.minimax(&mut Board::new(), 0, true), 0);
        // 549_946 positions in the full game tree.
        assert_eq!(searcher.stats().nodes, 549_946);
    }

    #[test]
    fn test_alpha_beta_agrees_and_prunes() {
        let positions = [
            Board::new(),
            board(["X__", "___", "___"]),
            board(["_X_", "___", "___"]),
            board(["X__", "_O_", "__X"]),
            board(["X_X", "_O_", "___"]),
        ];
        for position in positions {
            let (plain, plain_stats) = best_move(&position, Strategy::Minimax);
            let (pruned, pruned_stats) = best_move(&position, Strategy::AlphaBeta);
            assert_eq!(plain, pruned, "\n{position}");
            assert!(pruned_stats.nodes < plain_stats.nodes);
        }
    }
}
