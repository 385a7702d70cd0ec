//! Work counters shared by the search strategies.

/// Counters collected while a search runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose successors were generated.
    pub expanded: usize,
    /// Successors produced by the problem.
    pub generated: usize,
    /// Successors discarded because their state was already seen.
    pub pruned: usize,
    /// Largest frontier size observed (queue, stack or open list).
    pub max_frontier: usize,
}

impl SearchStats {
    pub(crate) fn observe_frontier(&mut self, len: usize) {
        self.max_frontier = self.max_frontier.max(len);
    }

    /// Adds the counters of another run, keeping the larger frontier peak.
    pub fn accumulate(&mut self, other: &Self) {
        self.expanded += other.expanded;
        self.generated += other.generated;
        self.pruned += other.pruned;
        self.max_frontier = self.max_frontier.max(other.max_frontier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate() {
        let mut total = SearchStats {
            expanded: 1,
            generated: 2,
            pruned: 0,
            max_frontier: 5,
        };
        total.accumulate(&SearchStats {
            expanded: 3,
            generated: 4,
            pruned: 1,
            max_frontier: 2,
        });
        assert_eq!(
            total,
            SearchStats {
                expanded: 4,
                generated: 6,
                pruned: 1,
                max_frontier: 5,
            }
        );
    }
}
