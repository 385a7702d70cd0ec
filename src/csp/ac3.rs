//! Arc consistency (AC-3).

use crate::csp::problem::{Csp, VarId};
use log::trace;
use std::collections::VecDeque;

/// Runs AC-3 over a set of working domains and counts what it did.
///
/// The domains are kept outside the [`Csp`] so a solver can snapshot and
/// restore them while the problem itself stays immutable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ac3 {
    /// Number of `revise` calls that removed at least one value.
    pub revisions: usize,
    /// Total number of values removed.
    pub pruned_values: usize,
}

impl Ac3 {
    /// A runner with zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            revisions: 0,
            pruned_values: 0,
        }
    }

    /// Every directed arc of `csp`, ready to seed [`run`](Self::run).
    #[must_use]
    pub fn all_arcs<T>(csp: &Csp<T>) -> VecDeque<(VarId, VarId)> {
        csp.arcs().collect()
    }

    /// Processes `queue` until it is empty or a domain is wiped out.
    ///
    /// Returns `false` if some variable is left with no values.
    pub fn run<T>(
        &mut self,
        csp: &Csp<T>,
        domains: &mut [Vec<T>],
        mut queue: VecDeque<(VarId, VarId)>,
    ) -> bool {
        while let Some((xi, xj)) = queue.pop_front() {
            if self.revise(csp, domains, xi, xj) {
                if domains[xi].is_empty() {
                    trace!("domain of {} wiped out", csp.name(xi));
                    return false;
                }
                queue.extend(
                    csp.neighbors(xi)
                        .iter()
                        .filter(|&&xk| xk != xj)
                        .map(|&xk| (xk, xi)),
                );
            }
        }
        true
    }

    /// Drops every value of `xi` that has no support in the domain of `xj`.
    ///
    /// Returns whether anything was removed.
    pub fn revise<T>(
        &mut self,
        csp: &Csp<T>,
        domains: &mut [Vec<T>],
        xi: VarId,
        xj: VarId,
    ) -> bool {
        let predicates = csp.arc(xi, xj);
        if predicates.is_empty() {
            return false;
        }

        let (source, support) = if xi < xj {
            let (left, right) = domains.split_at_mut(xj);
            (&mut left[xi], &right[0])
        } else {
            let (left, right) = domains.split_at_mut(xi);
            (&mut right[0], &left[xj])
        };

        let before = source.len();
        source.retain(|vi| {
            support
                .iter()
                .any(|vj| predicates.iter().all(|predicate| predicate(vi, vj)))
        });
        let removed = before - source.len();

        if removed > 0 {
            self.revisions += 1;
            self.pruned_values += removed;
        }
        removed > 0
    }
}
