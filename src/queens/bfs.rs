//! N-Queens through the generic breadth-first search.

use crate::queens::QueensStats;
use crate::queens::board::Placement;
use crate::search::bfs::breadth_first;
use crate::search::{SearchProblem, Successors};

/// Partial placements, one column deeper per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueensProblem {
    n: usize,
}

impl QueensProblem {
    /// Placing `n` queens on an `n × n` board.
    #[must_use]
    pub const fn new(n: usize) -> Self {
        Self { n }
    }
}

impl SearchProblem for QueensProblem {
    type State = Placement;
    type Cost = usize;

    fn initial_state(&self) -> Placement {
        Placement::default()
    }

    fn is_goal(&self, state: &Placement) -> bool {
        state.len() == self.n
    }

    fn successors(&self, state: &Placement) -> Successors<Placement, usize> {
        let col = state.len();
        if col >= self.n {
            return Successors::new();
        }
        (0..self.n)
            .filter(|&row| state.is_safe(col, row))
            .map(|row| {
                let mut rows = state.rows().to_vec();
                rows.push(row);
                (Placement::new(rows), 1)
            })
            .collect()
    }
}

/// The first complete placement reached level by level, which is the
/// lexicographically smallest solution.
#[must_use]
pub fn solve(n: usize) -> (Option<Placement>, QueensStats) {
    let (solution, search) = breadth_first(&QueensProblem::new(n));
    let stats = QueensStats {
        nodes: search.expanded,
        ..QueensStats::default()
    };
    (solution.and_then(|s| s.goal().cloned()), stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_backtracking_first_solution() {
        let (solution, stats) = solve(8);
        assert_eq!(solution.unwrap().rows(), &[0, 4, 7, 5, 2, 6, 1, 3]);
        assert!(stats.nodes > 0);
    }

    #[test]
    fn test_small_boards() {
        assert_eq!(solve(0).0, Some(Placement::default()));
        assert_eq!(solve(1).0.unwrap().rows(), &[0]);
        assert_eq!(solve(2).0, None);
        assert_eq!(solve(3).0, None);
        assert_eq!(solve(4).0.unwrap().rows(), &[1, 3, 0, 2]);
    }
}
