//! Problem descriptions consumed by the search strategies.

use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

/// Successor list returned by [`SearchProblem::successors`].
///
/// Most puzzles branch at most four ways, so the inline capacity avoids a heap
/// allocation per expansion; wider problems simply spill.
pub type Successors<S, C> = SmallVec<[(S, C); 4]>;

/// A deterministic, fully observable search problem.
pub trait SearchProblem {
    /// A node of the state space.
    type State: Clone + Eq + Hash + Debug;

    /// Path cost. `Default::default()` is the zero cost.
    type Cost: Copy + Ord + Default + Add<Output = Self::Cost> + Debug;

    /// The state the search starts from.
    fn initial_state(&self) -> Self::State;

    /// Whether `state` satisfies the goal test.
    fn is_goal(&self, state: &Self::State) -> bool;

    /// States reachable in one step, with the cost of that step.
    ///
    /// The order is significant: uninformed strategies explore successors in
    /// exactly this order.
    fn successors(&self, state: &Self::State) -> Successors<Self::State, Self::Cost>;
}

/// A [`SearchProblem`] with a heuristic estimate of the remaining cost.
pub trait InformedProblem: SearchProblem {
    /// Estimated cost from `state` to the nearest goal. A* is optimal when this
    /// never overestimates.
    fn heuristic(&self, state: &Self::State) -> Self::Cost;
}

/// A path from the initial state to a goal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<S, C> {
    /// Every state on the path, initial and goal included.
    pub path: Vec<S>,
    /// Sum of the step costs along `path`.
    pub cost: C,
}

impl<S, C> Solution<S, C> {
    /// Number of steps taken.
    #[must_use]
    pub const fn moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The goal state reached.
    #[must_use]
    pub fn goal(&self) -> Option<&S> {
        self.path.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_moves() {
        let solution = Solution {
            path: vec![1, 2, 3],
            cost: 2,
        };
        assert_eq!(solution.moves(), 2);
        assert_eq!(solution.goal(), Some(&3));
    }

    #[test]
    fn test_solution_moves_empty_path() {
        let solution: Solution<u8, u32> = Solution {
            path: Vec::new(),
            cost: 0,
        };
        assert_eq!(solution.moves(), 0);
        assert_eq!(solution.goal(), None);
    }
}
