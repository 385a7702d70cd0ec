//! A* search.
//!
//! The open list is a binary heap ordered by `(f, g, insertion order)`, so
//! among equally promising nodes the one with the smaller path cost is taken
//! first, then the one generated earliest. States are closed when popped;
//! stale heap entries for closed states are skipped instead of being updated
//! in place.

use crate::search::problem::{InformedProblem, Solution};
use crate::search::stats::SearchStats;
use crate::search::tree::SearchTree;
use log::{debug, trace};
use rustc_hash::FxHashSet;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Entry<C> {
    f: C,
    g: C,
    seq: usize,
    node: usize,
}

/// Best-first search on `f = g + h`.
///
/// Returns the first goal popped from the open list together with its path
/// cost. With an admissible heuristic this is an optimal solution.
pub fn a_star<P: InformedProblem>(
    problem: &P,
) -> (Option<Solution<P::State, P::Cost>>, SearchStats) {
    let mut stats = SearchStats::default();
    let mut tree = SearchTree::new();
    let mut closed: FxHashSet<P::State> = FxHashSet::default();
    let mut open = BinaryHeap::new();
    let mut seq = 0_usize;

    let start = problem.initial_state();
    let h = problem.heuristic(&start);
    let root = tree.push(start, None, P::Cost::default());
    open.push(Reverse(Entry {
        f: P::Cost::default() + h,
        g: P::Cost::default(),
        seq,
        node: root,
    }));
    stats.observe_frontier(open.len());

    while let Some(Reverse(entry)) = open.pop() {
        let state = tree.state(entry.node);

        if problem.is_goal(state) {
            debug!(
                "a*: goal with cost {:?} after {} expansions",
                entry.g, stats.expanded
            );
            let solution = Solution {
                path: tree.path_to(entry.node),
                cost: entry.g,
            };
            return (Some(solution), stats);
        }

        if closed.contains(state) {
            stats.pruned += 1;
            continue;
        }
        closed.insert(state.clone());
        stats.expanded += 1;
        trace!("a*: expanding {state:?} (f = {:?}, g = {:?})", entry.f, entry.g);

        let successors = problem.successors(state);
        for (next, step) in successors {
            stats.generated += 1;
            if closed.contains(&next) {
                stats.pruned += 1;
                continue;
            }
            let g = entry.g + step;
            let f = g + problem.heuristic(&next);
            let child = tree.push(next, Some(entry.node), g);
            seq += 1;
            open.push(Reverse(Entry {
                f,
                g,
                seq,
                node: child,
            }));
        }
        stats.observe_frontier(open.len());
    }

    debug!("a*: open list exhausted after {} expansions", stats.expanded);
    (None, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::problem::{SearchProblem, Successors};

    /// Explicit weighted digraph over `0..n` with a per-node heuristic table.
    struct Table {
        edges: Vec<Vec<(usize, u32)>>,
        h: Vec<u32>,
        goal: usize,
    }

    impl SearchProblem for Table {
        type State = usize;
        type Cost = u32;

        fn initial_state(&self) -> usize {
            0
        }

        fn is_goal(&self, state: &usize) -> bool {
            *state == self.goal
        }

        fn successors(&self, state: &usize) -> Successors<usize, u32> {
            self.edges[*state].iter().copied().collect()
        }
    }

    impl InformedProblem for Table {
        fn heuristic(&self, state: &usize) -> u32 {
            self.h[*state]
        }
    }

    fn diamond(h: Vec<u32>) -> Table {
        // 0 -> 1 (1) -> 3 (10)
        // 0 -> 2 (4) -> 3 (1)
        Table {
            edges: vec![vec![(1, 1), (2, 4)], vec![(3, 10)], vec![(3, 1)], vec![]],
            h,
            goal: 3,
        }
    }

    #[test]
    fn test_a_star_prefers_cheaper_path() {
        let (solution, stats) = a_star(&diamond(vec![0, 0, 0, 0]));
        let solution = solution.unwrap();
        assert_eq!(solution.path, vec![0, 2, 3]);
        assert_eq!(solution.cost, 5);
        assert!(stats.expanded >= 2);
    }

    #[test]
    fn test_a_star_with_informative_heuristic_expands_less() {
        let (uninformed, blind) = a_star(&diamond(vec![0, 0, 0, 0]));
        let (informed, guided) = a_star(&diamond(vec![5, 10, 1, 0]));
        assert_eq!(uninformed.unwrap().cost, informed.unwrap().cost);
        assert!(guided.expanded <= blind.expanded);
    }

    #[test]
    fn test_equal_f_prefers_smaller_g() {
        // Both routes cost 4 and both middle nodes have f = 4; node 1 has the
        // smaller g even though node 2 is generated first.
        let table = Table {
            edges: vec![vec![(2, 3), (1, 1)], vec![(3, 3)], vec![(3, 1)], vec![]],
            h: vec![0, 3, 1, 0],
            goal: 3,
        };
        let (solution, _) = a_star(&table);
        let solution = solution.unwrap();
        assert_eq!(solution.path, vec![0, 1, 3]);
        assert_eq!(solution.cost, 4);
    }

    #[test]
    fn test_equal_f_and_g_prefers_first_generated() {
        let table = |first: usize, second: usize| Table {
            edges: vec![
                vec![(first, 2), (second, 2)],
                vec![(3, 1)],
                vec![(3, 1)],
                vec![],
            ],
            h: vec![0, 1, 1, 0],
            goal: 3,
        };
        assert_eq!(a_star(&table(1, 2)).0.unwrap().path, vec![0, 1, 3]);
        assert_eq!(a_star(&table(2, 1)).0.unwrap().path, vec![0, 2, 3]);
    }

    #[test]
    fn test_a_star_unreachable() {
        let table = Table {
            edges: vec![vec![(1, 1)], vec![(0, 1)], vec![]],
            h: vec![0, 0, 0],
            goal: 2,
        };
        let (solution, stats) = a_star(&table);
        assert!(solution.is_none());
        assert_eq!(stats.expanded, 2);
    }
}
