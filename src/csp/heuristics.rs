//! Variable and value ordering for backtracking search.

use crate::csp::problem::{Csp, VarId};
use clap::ValueEnum;
use std::cmp::Reverse;
use std::fmt::Display;

/// How the next variable to assign is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum VariableOrdering {
    /// Minimum remaining values, ties broken by the most neighbours.
    #[default]
    Mrv,
    /// Declaration order.
    Static,
}

/// How the values of the chosen variable are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum ValueOrdering {
    /// Least constraining value first.
    #[default]
    Lcv,
    /// Current domain order.
    Domain,
}

impl Display for VariableOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mrv => write!(f, "MRV + degree"),
            Self::Static => write!(f, "static"),
        }
    }
}

impl Display for ValueOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lcv => write!(f, "LCV"),
            Self::Domain => write!(f, "domain order"),
        }
    }
}

impl VariableOrdering {
    /// Picks an unassigned variable, or `None` when all are assigned.
    ///
    /// Full ties under MRV resolve to the earliest declared variable.
    #[must_use]
    pub fn select<T>(
        self,
        csp: &Csp<T>,
        domains: &[Vec<T>],
        assignment: &[Option<T>],
    ) -> Option<VarId> {
        let mut unassigned = (0..csp.len()).filter(|&var| assignment[var].is_none());
        match self {
            Self::Static => unassigned.next(),
            Self::Mrv => unassigned
                .min_by_key(|&var| (domains[var].len(), Reverse(csp.neighbors(var).len()))),
        }
    }
}

impl ValueOrdering {
    /// The values of `var` to try, in order.
    #[must_use]
    pub fn order<T: Clone + Ord>(
        self,
        csp: &Csp<T>,
        var: VarId,
        domains: &[Vec<T>],
        assignment: &[Option<T>],
    ) -> Vec<T> {
        match self {
            Self::Domain => domains[var].clone(),
            Self::Lcv => {
                let mut ranked: Vec<(usize, T)> = domains[var]
                    .iter()
                    .map(|value| (eliminated(csp, var, value, domains, assignment), value.clone()))
                    .collect();
                ranked.sort();
                ranked.into_iter().map(|(_, value)| value).collect()
            }
        }
    }
}

/// How many values in unassigned neighbours' domains `var = value` rules out.
fn eliminated<T>(
    csp: &Csp<T>,
    var: VarId,
    value: &T,
    domains: &[Vec<T>],
    assignment: &[Option<T>],
) -> usize {
    csp.neighbors(var)
        .iter()
        .filter(|&&nbr| assignment[nbr].is_none())
        .map(|&nbr| {
            domains[nbr]
                .iter()
                .filter(|other| !csp.satisfies(var, value, nbr, other))
                .count()
        })
        .sum()
}
