//! Min-conflicts local search with random restarts.

use crate::queens::QueensStats;
use crate::queens::board::Placement;
use fastrand::Rng;
use log::{debug, trace};

/// Repair steps per random start unless configured otherwise.
pub const DEFAULT_MAX_STEPS: usize = 10_000;
/// Random starts unless configured otherwise.
pub const DEFAULT_MAX_RESTARTS: usize = 50;

/// Limits and seed for [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinConflictsConfig {
    /// Repair steps per random start.
    pub max_steps: usize,
    /// Random starts before giving up.
    pub max_restarts: usize,
    /// Fixes the random sequence; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for MinConflictsConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_restarts: DEFAULT_MAX_RESTARTS,
            seed: None,
        }
    }
}

/// Starts from a random placement and repeatedly moves a randomly chosen
/// attacked queen to a row with the fewest attackers (ties broken at random).
///
/// A start is abandoned after `max_steps` repairs. Returns `None` when
/// `max_restarts` starts have all been used up.
#[must_use]
pub fn solve(n: usize, config: &MinConflictsConfig) -> (Option<Placement>, QueensStats) {
    let mut rng = config.seed.map_or_else(Rng::new, Rng::with_seed);
    let mut stats = QueensStats::default();

    if n == 0 {
        return (Some(Placement::default()), stats);
    }

    for restart in 0..config.max_restarts {
        stats.restarts += 1;
        let mut placement = Placement::new((0..n).map(|_| rng.usize(..n)).collect());
        trace!("min-conflicts: start {restart}: {:?}", placement.rows());

        for _ in 0..config.max_steps {
            let conflicted = placement.conflicted_columns();
            if conflicted.is_empty() {
                debug!(
                    "min-conflicts: solved after {} steps and {} starts",
                    stats.steps, stats.restarts
                );
                return (Some(placement), stats);
            }
            stats.steps += 1;

            let col = conflicted[rng.usize(..conflicted.len())];
            let counts: Vec<usize> = (0..n)
                .map(|row| placement.conflicts_for(col, row))
                .collect();
            let fewest = counts.iter().copied().min().unwrap_or_default();
            let best: Vec<usize> = counts
                .iter()
                .enumerate()
                .filter(|&(_, &count)| count == fewest)
                .map(|(row, _)| row)
                .collect();
            placement.set(col, best[rng.usize(..best.len())]);
        }
        debug!("min-conflicts: start {restart} ran out of steps");
    }
    (None, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> MinConflictsConfig {
        MinConflictsConfig {
            seed: Some(seed),
            ..MinConflictsConfig::default()
        }
    }

    #[test]
    fn test_solves_eight_queens() {
        for seed in 0..10 {
            let (solution, stats) = solve(8, &seeded(seed));
            let solution = solution.unwrap();
            assert!(solution.is_solution(8), "seed {seed}:\n{solution}");
            assert!(stats.restarts >= 1);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        let first = solve(20, &seeded(7));
        let second = solve(20, &seeded(7));
        assert_eq!(first, second);
        assert!(first.0.unwrap().is_solution(20));
    }

    #[test]
    fn test_impossible_board_uses_every_restart() {
        let config = MinConflictsConfig {
            max_steps: 50,
            max_restarts: 3,
            seed: Some(1),
        };
        let (solution, stats) = solve(3, &config);
        assert_eq!(solution, None);
        assert_eq!(stats.restarts, 3);
        assert_eq!(stats.steps, 150);
    }

    #[test]
    fn test_trivial_boards() {
        assert_eq!(solve(0, &seeded(0)).0, Some(Placement::default()));
        assert_eq!(solve(1, &seeded(0)).0.unwrap().rows(), &[0]);
    }
}
