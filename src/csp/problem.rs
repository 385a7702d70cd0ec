//! Binary constraint satisfaction problems.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::{self, Debug};
use std::rc::Rc;

/// Index of a variable in a [`Csp`], in declaration order.
pub type VarId = usize;

/// A binary constraint `f(value_of_xi, value_of_xj)` attached to the arc `(xi, xj)`.
pub type Predicate<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// Variables with finite domains and binary constraints between them.
///
/// Constraints are stored per directed arc: adding `f` between `xi` and `xj`
/// stores `f` on `(xi, xj)` and the argument-swapped `f` on `(xj, xi)`, so
/// every lookup reads "value of the first variable, value of the second".
#[derive(Clone)]
pub struct Csp<T> {
    names: Vec<String>,
    domains: Vec<Vec<T>>,
    neighbors: Vec<Vec<VarId>>,
    constraints: FxHashMap<(VarId, VarId), Vec<Predicate<T>>>,
    distinct: FxHashSet<(VarId, VarId)>,
}

impl<T> Default for Csp<T> {
    fn default() -> Self {
        Self {
            names: Vec::new(),
            domains: Vec::new(),
            neighbors: Vec::new(),
            constraints: FxHashMap::default(),
            distinct: FxHashSet::default(),
        }
    }
}

impl<T: Debug> Debug for Csp<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Csp")
            .field("names", &self.names)
            .field("domains", &self.domains)
            .field("neighbors", &self.neighbors)
            .field("arcs", &self.constraints.len())
            .finish()
    }
}

impl<T: Clone + 'static> Csp<T> {
    /// A problem with no variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a variable and returns its id.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: Vec<T>) -> VarId {
        self.names.push(name.into());
        self.domains.push(domain);
        self.neighbors.push(Vec::new());
        self.names.len() - 1
    }

    /// Constrains `xi` and `xj` with `f(value_of_xi, value_of_xj)`.
    ///
    /// Self-constraints are ignored: they are unary and belong in the domain.
    pub fn add_constraint<F>(&mut self, xi: VarId, xj: VarId, f: F)
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        if xi == xj {
            return;
        }
        let forward: Predicate<T> = Rc::new(f);
        let flipped = Rc::clone(&forward);
        let backward: Predicate<T> = Rc::new(move |b: &T, a: &T| flipped(a, b));

        self.constraints.entry((xi, xj)).or_default().push(forward);
        self.constraints.entry((xj, xi)).or_default().push(backward);

        if !self.neighbors[xi].contains(&xj) {
            self.neighbors[xi].push(xj);
            self.neighbors[xj].push(xi);
        }
    }

    /// Requires `xi` and `xj` to take different values. Adding the same pair
    /// twice (in either order) has no further effect.
    pub fn add_not_equal(&mut self, xi: VarId, xj: VarId)
    where
        T: PartialEq,
    {
        let key = (xi.min(xj), xi.max(xj));
        if xi != xj && self.distinct.insert(key) {
            self.add_constraint(xi, xj, |a: &T, b: &T| a != b);
        }
    }

    /// Pairwise [`add_not_equal`](Self::add_not_equal) over `vars`.
    pub fn add_all_different(&mut self, vars: &[VarId])
    where
        T: PartialEq,
    {
        for (i, &xi) in vars.iter().enumerate() {
            for &xj in &vars[i + 1..] {
                self.add_not_equal(xi, xj);
            }
        }
    }
}

impl<T> Csp<T> {
    /// Number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The name `var` was added under.
    #[must_use]
    pub fn name(&self, var: VarId) -> &str {
        &self.names[var]
    }

    /// Looks a variable up by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<VarId> {
        self.names.iter().position(|n| n == name)
    }

    /// The declared (unpruned) domains, indexed by [`VarId`].
    #[must_use]
    pub fn domains(&self) -> &[Vec<T>] {
        &self.domains
    }

    /// Variables sharing at least one constraint with `var`, in the order the
    /// constraints were added.
    #[must_use]
    pub fn neighbors(&self, var: VarId) -> &[VarId] {
        &self.neighbors[var]
    }

    /// Every directed arc, grouped by source variable.
    pub fn arcs(&self) -> impl Iterator<Item = (VarId, VarId)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .flat_map(|(xi, nbrs)| nbrs.iter().map(move |&xj| (xi, xj)))
    }

    /// Predicates on the arc `(xi, xj)`.
    #[must_use]
    pub fn arc(&self, xi: VarId, xj: VarId) -> &[Predicate<T>] {
        self.constraints
            .get(&(xi, xj))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Whether `xi = vi` and `xj = vj` satisfy every constraint between them.
    #[must_use]
    pub fn satisfies(&self, xi: VarId, vi: &T, xj: VarId, vj: &T) -> bool {
        self.arc(xi, xj).iter().all(|predicate| predicate(vi, vj))
    }

    /// Whether the value assigned to `var` agrees with every assigned neighbour.
    /// An unassigned `var` is trivially consistent.
    #[must_use]
    pub fn is_consistent(&self, var: VarId, assignment: &[Option<T>]) -> bool {
        let Some(value) = &assignment[var] else {
            return true;
        };
        self.neighbors[var].iter().all(|&other| match &assignment[other] {
            Some(other_value) => self.satisfies(var, value, other, other_value),
            None => true,
        })
    }

    /// Checks a complete assignment against every domain and every constraint.
    #[must_use]
    pub fn verify(&self, values: &[T]) -> bool
    where
        T: PartialEq,
    {
        values.len() == self.len()
            && values
                .iter()
                .zip(&self.domains)
                .all(|(value, domain)| domain.contains(value))
            && self
                .arcs()
                .all(|(xi, xj)| self.satisfies(xi, &values[xi], xj, &values[xj]))
    }

    /// Pairs every variable name with its value.
    #[must_use]
    pub fn named<'a>(&'a self, values: &'a [T]) -> Vec<(&'a str, &'a T)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(values.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_is_registered_both_ways() {
        let mut csp = Csp::new();
        let x = csp.add_variable("x", vec![1, 2, 3]);
        let y = csp.add_variable("y", vec![1, 2, 3]);
        csp.add_constraint(x, y, |a: &i32, b: &i32| a < b);

        assert!(csp.satisfies(x, &1, y, &2));
        assert!(!csp.satisfies(x, &2, y, &1));
        // The reverse arc reads (value of y, value of x).
        assert!(csp.satisfies(y, &2, x, &1));
        assert!(!csp.satisfies(y, &1, x, &2));
        assert_eq!(csp.neighbors(x), &[y]);
        assert_eq!(csp.neighbors(y), &[x]);
    }

    #[test]
    fn test_not_equal_is_idempotent() {
        let mut csp = Csp::new();
        let a = csp.add_variable("a", vec!['r', 'g']);
        let b = csp.add_variable("b", vec!['r', 'g']);
        csp.add_not_equal(a, b);
        csp.add_not_equal(b, a);
        csp.add_not_equal(a, a);
        assert_eq!(csp.arc(a, b).len(), 1);
        assert_eq!(csp.arc(b, a).len(), 1);
        assert!(csp.arc(a, a).is_empty());
        assert_eq!(csp.arcs().count(), 2);
    }

    #[test]
    fn test_is_consistent_ignores_unassigned() {
        let mut csp = Csp::new();
        let a = csp.add_variable("a", vec![1, 2]);
        let b = csp.add_variable("b", vec![1, 2]);
        let c = csp.add_variable("c", vec![1, 2]);
        csp.add_all_different(&[a, b, c]);

        assert!(csp.is_consistent(a, &[Some(1), None, None]));
        assert!(!csp.is_consistent(a, &[Some(1), Some(1), None]));
        assert!(csp.is_consistent(c, &[Some(1), Some(2), None]));
    }

    #[test]
    fn test_verify_and_lookup() {
        let mut csp = Csp::new();
        let a = csp.add_variable("a", vec![1, 2]);
        let b = csp.add_variable("b", vec![1, 2]);
        csp.add_not_equal(a, b);

        assert!(csp.verify(&[1, 2]));
        assert!(!csp.verify(&[1, 1]));
        assert!(!csp.verify(&[1, 3]));
        assert!(!csp.verify(&[1]));
        assert_eq!(csp.variable("b"), Some(b));
        assert_eq!(csp.variable("z"), None);
        assert_eq!(csp.named(&[2, 1]), vec![("a", &2), ("b", &1)]);
    }
}
