//! Depth-limited and iterative-deepening depth-first search.

use crate::search::problem::{SearchProblem, Solution};
use crate::search::stats::SearchStats;
use crate::search::tree::SearchTree;
use log::{debug, trace};
use rustc_hash::FxHashSet;

/// Depth limit used when the caller does not pick one.
pub const DEFAULT_DEPTH_LIMIT: usize = 50;

struct Frame<I> {
    node: usize,
    children: I,
}

struct Outcome<S, C> {
    solution: Option<Solution<S, C>>,
    stats: SearchStats,
    cutoff: bool,
}

/// Depth-first search that does not expand nodes at depth `depth_limit`.
///
/// The goal test runs before the depth check, so a goal lying exactly at the
/// limit is still found. Expanded states are remembered for the whole run and
/// never revisited, which keeps the search linear in the number of states but
/// means the returned path is not necessarily the shortest one.
pub fn depth_limited<P: SearchProblem>(
    problem: &P,
    depth_limit: usize,
) -> (Option<Solution<P::State, P::Cost>>, SearchStats) {
    let outcome = run(problem, depth_limit);
    (outcome.solution, outcome.stats)
}

/// Runs [`depth_limited`] with limits `0..=max_depth` until a solution appears.
///
/// Stops early when a run completes without ever reaching its cutoff: the
/// reachable space is then exhausted and deeper limits cannot help.
pub fn iterative_deepening<P: SearchProblem>(
    problem: &P,
    max_depth: usize,
) -> (Option<Solution<P::State, P::Cost>>, SearchStats) {
    let mut total = SearchStats::default();
    for limit in 0..=max_depth {
        let outcome = run(problem, limit);
        total.accumulate(&outcome.stats);
        if outcome.solution.is_some() {
            debug!("iddfs: solved with limit {limit}");
            return (outcome.solution, total);
        }
        if !outcome.cutoff {
            debug!("iddfs: space exhausted at limit {limit}");
            break;
        }
    }
    (None, total)
}

fn run<P: SearchProblem>(problem: &P, depth_limit: usize) -> Outcome<P::State, P::Cost> {
    let mut stats = SearchStats::default();
    let mut tree = SearchTree::new();
    let mut visited: FxHashSet<P::State> = FxHashSet::default();
    let mut cutoff = false;

    let found = |tree: &SearchTree<P::State, P::Cost>, node: usize, stats: SearchStats| {
        debug!("dfs: goal at depth {}", tree.depth(node));
        Outcome {
            solution: Some(Solution {
                path: tree.path_to(node),
                cost: tree.cost(node),
            }),
            stats,
            cutoff: false,
        }
    };

    let root = tree.push(problem.initial_state(), None, P::Cost::default());
    if problem.is_goal(tree.state(root)) {
        return found(&tree, root, stats);
    }
    if depth_limit == 0 {
        return Outcome {
            solution: None,
            stats,
            cutoff: true,
        };
    }

    visited.insert(tree.state(root).clone());
    stats.expanded += 1;
    let mut stack = vec![Frame {
        node: root,
        children: problem.successors(tree.state(root)).into_iter(),
    }];
    stats.observe_frontier(stack.len());

    while let Some(frame) = stack.last_mut() {
        let parent = frame.node;
        let Some((next, step)) = frame.children.next() else {
            stack.pop();
            continue;
        };

        stats.generated += 1;
        if visited.contains(&next) {
            stats.pruned += 1;
            continue;
        }

        let cost = tree.cost(parent) + step;
        let child = tree.push(next, Some(parent), cost);
        if problem.is_goal(tree.state(child)) {
            return found(&tree, child, stats);
        }
        if tree.depth(child) >= depth_limit {
            cutoff = true;
            continue;
        }

        trace!("dfs: expanding {:?} at depth {}", tree.state(child), tree.depth(child));
        visited.insert(tree.state(child).clone());
        stats.expanded += 1;
        stack.push(Frame {
            node: child,
            children: problem.successors(tree.state(child)).into_iter(),
        });
        stats.observe_frontier(stack.len());
    }

    debug!(
        "dfs: no goal within depth {depth_limit} ({} expansions)",
        stats.expanded
    );
    Outcome {
        solution: None,
        stats,
        cutoff,
    }
}
