//! Breadth-first search.

use crate::search::problem::{SearchProblem, Solution};
use crate::search::stats::SearchStats;
use crate::search::tree::SearchTree;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Searches level by level and returns the shallowest solution.
///
/// States are marked as visited when they are enqueued, so each state enters
/// the frontier at most once; the goal test is applied when a node is
/// dequeued. Returns `None` once every reachable state has been dequeued.
pub fn breadth_first<P: SearchProblem>(
    problem: &P,
) -> (Option<Solution<P::State, P::Cost>>, SearchStats) {
    let mut stats = SearchStats::default();
    let mut tree = SearchTree::new();
    let mut visited: FxHashSet<P::State> = FxHashSet::default();

    let start = problem.initial_state();
    visited.insert(start.clone());
    let root = tree.push(start, None, P::Cost::default());

    let mut frontier = VecDeque::from([root]);
    stats.observe_frontier(frontier.len());

    while let Some(node) = frontier.pop_front() {
        if problem.is_goal(tree.state(node)) {
            debug!(
                "bfs: goal at depth {} after {} expansions",
                tree.depth(node),
                stats.expanded
            );
            let solution = Solution {
                path: tree.path_to(node),
                cost: tree.cost(node),
            };
            return (Some(solution), stats);
        }

        stats.expanded += 1;
        trace!("bfs: expanding {:?}", tree.state(node));

        let successors = problem.successors(tree.state(node));
        for (next, step) in successors {
            stats.generated += 1;
            if !visited.insert(next.clone()) {
                stats.pruned += 1;
                continue;
            }
            let cost = tree.cost(node) + step;
            let child = tree.push(next, Some(node), cost);
            frontier.push_back(child);
        }
        stats.observe_frontier(frontier.len());
    }

    debug!("bfs: exhausted after {} expansions", stats.expanded);
    (None, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::problem::Successors;
    use smallvec::smallvec;

    /// Reach `target` from 1 using "+1" and "*2" steps, staying below `bound`.
    struct Doubling {
        target: u32,
        bound: u32,
    }

    impl SearchProblem for Doubling {
        type State = u32;
        type Cost = u32;

        fn initial_state(&self) -> u32 {
            1
        }

        fn is_goal(&self, state: &u32) -> bool {
            *state == self.target
        }

        fn successors(&self, state: &u32) -> Successors<u32, u32> {
            let mut next: Successors<u32, u32> = smallvec![];
            for candidate in [state + 1, state * 2] {
                if candidate < self.bound {
                    next.push((candidate, 1));
                }
            }
            next
        }
    }

    #[test]
    fn test_bfs_finds_shallowest_path() {
        let problem = Doubling {
            target: 10,
            bound: 100,
        };
        let (solution, stats) = breadth_first(&problem);
        let solution = solution.expect("10 is reachable");

        // 1 -> 2 -> 4 -> 5 -> 10
        assert_eq!(solution.path, vec![1, 2, 4, 5, 10]);
        assert_eq!(solution.cost, 4);
        assert_eq!(solution.moves(), 4);
        assert!(stats.expanded > 0);
        assert!(stats.generated >= stats.expanded);
    }

    #[test]
    fn test_bfs_start_is_goal() {
        let problem = Doubling {
            target: 1,
            bound: 100,
        };
        let (solution, stats) = breadth_first(&problem);
        assert_eq!(solution.unwrap().path, vec![1]);
        assert_eq!(stats.expanded, 0);
    }

    #[test]
    fn test_bfs_unreachable_goal_exhausts() {
        let problem = Doubling {
            target: 50,
            bound: 20,
        };
        let (solution, stats) = breadth_first(&problem);
        assert!(solution.is_none());
        // Every state in 1..20 is expanded exactly once.
        assert_eq!(stats.expanded, 19);
    }
}
