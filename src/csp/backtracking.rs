//! Backtracking search with arc-consistency inference.

use crate::csp::ac3::Ac3;
use crate::csp::heuristics::{ValueOrdering, VariableOrdering};
use crate::csp::problem::{Csp, VarId};
use log::{debug, trace};
use std::collections::VecDeque;

/// Tuning knobs for [`BacktrackingSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BacktrackingConfig {
    /// How the next variable is picked.
    pub variable_ordering: VariableOrdering,
    /// How the chosen variable's values are ordered.
    pub value_ordering: ValueOrdering,
    /// Maintain arc consistency after every assignment.
    pub inference: bool,
}

impl Default for BacktrackingConfig {
    fn default() -> Self {
        Self {
            variable_ordering: VariableOrdering::default(),
            value_ordering: ValueOrdering::default(),
            inference: true,
        }
    }
}

/// Counters gathered during one [`BacktrackingSolver::solve`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CspStats {
    /// Values tentatively assigned to a variable.
    pub assignments: usize,
    /// Assignments that were undone.
    pub backtracks: usize,
    /// AC-3 revisions that removed something.
    pub revisions: usize,
    /// Values removed by AC-3.
    pub pruned_values: usize,
}

/// Depth-first assignment of one variable at a time.
///
/// The solver works on its own copy of the domains. Before each inference
/// step the domains are snapshotted and restored if the branch fails.
#[derive(Debug)]
pub struct BacktrackingSolver<'a, T> {
    csp: &'a Csp<T>,
    config: BacktrackingConfig,
    domains: Vec<Vec<T>>,
    assignment: Vec<Option<T>>,
    ac3: Ac3,
    stats: CspStats,
}

impl<'a, T: Clone + Ord> BacktrackingSolver<'a, T> {
    /// A solver over `csp`; call [`Self::solve`] to run it.
    #[must_use]
    pub fn new(csp: &'a Csp<T>, config: BacktrackingConfig) -> Self {
        Self {
            csp,
            config,
            domains: csp.domains().to_vec(),
            assignment: vec![None; csp.len()],
            ac3: Ac3::new(),
            stats: CspStats::default(),
        }
    }

    /// Finds a complete consistent assignment, indexed by [`VarId`].
    pub fn solve(&mut self) -> Option<Vec<T>> {
        self.domains = self.csp.domains().to_vec();
        self.assignment = vec![None; self.csp.len()];
        self.ac3 = Ac3::new();
        self.stats = CspStats::default();

        let arcs = Ac3::all_arcs(self.csp);
        let consistent = self.ac3.run(self.csp, &mut self.domains, arcs);
        debug!(
            "AC-3 preprocessing removed {} values ({} revisions)",
            self.ac3.pruned_values, self.ac3.revisions
        );

        let solved = consistent && self.backtrack();
        self.stats.revisions = self.ac3.revisions;
        self.stats.pruned_values = self.ac3.pruned_values;

        if !solved {
            debug!("no consistent assignment exists");
            return None;
        }
        self.assignment.iter().cloned().collect()
    }

    /// Counters from the last [`Self::solve`].
    #[must_use]
    pub const fn stats(&self) -> &CspStats {
        &self.stats
    }

    fn backtrack(&mut self) -> bool {
        let Some(var) =
            self.config
                .variable_ordering
                .select(self.csp, &self.domains, &self.assignment)
        else {
            return true;
        };

        let values =
            self.config
                .value_ordering
                .order(self.csp, var, &self.domains, &self.assignment);

        for value in values {
            self.assignment[var] = Some(value.clone());
            self.stats.assignments += 1;
            trace!("assignment #{}: {}", self.stats.assignments, self.csp.name(var));

            if self.csp.is_consistent(var, &self.assignment) {
                let saved = self.domains.clone();
                self.domains[var] = vec![value];
                if self.infer(var) && self.backtrack() {
                    return true;
                }
                self.domains = saved;
            }

            self.assignment[var] = None;
            self.stats.backtracks += 1;
        }
        false
    }

    fn infer(&mut self, var: VarId) -> bool {
        if !self.config.inference {
            return true;
        }
        let queue: VecDeque<_> = self
            .csp
            .neighbors(var)
            .iter()
            .map(|&nbr| (nbr, var))
            .collect();
        self.ac3.run(self.csp, &mut self.domains, queue)
    }
}

/// Solves `csp` with the default configuration.
#[must_use]
pub fn backtracking_search<T: Clone + Ord>(csp: &Csp<T>) -> (Option<Vec<T>>, CspStats) {
    let mut solver = BacktrackingSolver::new(csp, BacktrackingConfig::default());
    let solution = solver.solve();
    (solution, *solver.stats())
}
