//! `parent(x, y)` facts and the relations derived from them.

use itertools::Itertools;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while reading a fact file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactsError {
    /// A line was not of the form `parent(x, y).`
    #[error("line {line}: expected `parent(<x>, <y>).`, found '{text}'")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// Someone was declared their own parent.
    #[error("line {line}: '{name}' cannot be their own parent")]
    SelfParent {
        /// 1-based line number.
        line: usize,
        /// The person named on both sides.
        name: String,
    },
}

/// An ordered, duplicate-free list of parent/child facts.
///
/// Names are stored lowercase; lookups lowercase their arguments too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactBase {
    parents: Vec<(String, String)>,
}

impl FactBase {
    /// An empty fact base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Two generations under john and susan.
    #[must_use]
    pub fn family() -> Self {
        let mut kb = Self::new();
        for (parent, child) in [
            ("john", "mary"),
            ("john", "mike"),
            ("susan", "mary"),
            ("susan", "mike"),
            ("mary", "alice"),
            ("mike", "bob"),
        ] {
            kb.add_parent(parent, child);
        }
        kb
    }

    /// Records `parent(parent, child)`. Returns `false` if it was already known.
    pub fn add_parent(&mut self, parent: &str, child: &str) -> bool {
        let fact = (parent.to_lowercase(), child.to_lowercase());
        if self.parents.contains(&fact) {
            return false;
        }
        self.parents.push(fact);
        true
    }

    /// All facts in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parents.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    /// Number of stored facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Whether no facts are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether `parent(parent, child)` is a stored fact.
    #[must_use]
    pub fn is_parent(&self, parent: &str, child: &str) -> bool {
        let (parent, child) = (parent.to_lowercase(), child.to_lowercase());
        self.facts().any(|(p, c)| p == parent && c == child)
    }

    /// Parents of `child`, in fact order.
    #[must_use]
    pub fn parents_of(&self, child: &str) -> Vec<String> {
        let child = child.to_lowercase();
        self.facts()
            .filter(|&(_, c)| c == child)
            .map(|(p, _)| p.to_string())
            .collect()
    }

    /// Children of `parent`, in fact order.
    #[must_use]
    pub fn children_of(&self, parent: &str) -> Vec<String> {
        let parent = parent.to_lowercase();
        self.facts()
            .filter(|&(p, _)| p == parent)
            .map(|(_, c)| c.to_string())
            .collect()
    }

    /// `x` and `y` are different people with at least one parent in common.
    #[must_use]
    pub fn siblings(&self, x: &str, y: &str) -> bool {
        let (x, y) = (x.to_lowercase(), y.to_lowercase());
        x != y
            && self
                .parents_of(&x)
                .iter()
                .any(|parent| self.is_parent(parent, &y))
    }

    /// `x` is a parent of a parent of `y`.
    #[must_use]
    pub fn grandparent(&self, x: &str, y: &str) -> bool {
        self.children_of(x)
            .iter()
            .any(|child| self.is_parent(child, y))
    }

    /// Everyone sharing a parent with `person`, without repeats.
    #[must_use]
    pub fn siblings_of(&self, person: &str) -> Vec<String> {
        let person = person.to_lowercase();
        self.parents_of(&person)
            .iter()
            .flat_map(|parent| self.children_of(parent))
            .filter(|child| *child != person)
            .unique()
            .collect()
    }

    /// Children of `person`'s children, without repeats.
    #[must_use]
    pub fn grandchildren_of(&self, person: &str) -> Vec<String> {
        self.children_of(person)
            .iter()
            .flat_map(|child| self.children_of(child))
            .unique()
            .collect()
    }
}

fn parse_fact(text: &str) -> Option<(&str, &str)> {
    let body = text
        .strip_suffix('.')
        .unwrap_or(text)
        .trim()
        .strip_prefix("parent")?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')?;
    let (parent, child) = body.split_once(',')?;
    let (parent, child) = (parent.trim(), child.trim());
    let is_name = |name: &str| {
        !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
    };
    (is_name(parent) && is_name(child)).then_some((parent, child))
}

impl FromStr for FactBase {
    type Err = FactsError;

    /// One `parent(x, y).` fact per line; `%` and `#` start comments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut kb = Self::new();
        for (idx, raw) in s.lines().enumerate() {
            let line = idx + 1;
            let text = raw
                .split(['%', '#'])
                .next()
                .unwrap_or_default()
                .trim();
            if text.is_empty() {
                continue;
            }
            let (parent, child) = parse_fact(text).ok_or_else(|| FactsError::Syntax {
                line,
                text: text.to_string(),
            })?;
            if parent.eq_ignore_ascii_case(child) {
                return Err(FactsError::SelfParent {
                    line,
                    name: parent.to_lowercase(),
                });
            }
            kb.add_parent(parent, child);
        }
        Ok(kb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_relations() {
        let kb = FactBase::family();
        assert_eq!(kb.len(), 6);
        assert!(kb.is_parent("john", "mary"));
        assert!(kb.is_parent("John", "MARY"));
        assert!(!kb.is_parent("mary", "john"));
        assert_eq!(kb.parents_of("mary"), vec!["john", "susan"]);
        assert_eq!(kb.children_of("john"), vec!["mary", "mike"]);
        assert!(kb.parents_of("john").is_empty());
        assert!(kb.children_of("nobody").is_empty());
    }

    #[test]
    fn test_siblings() {
        let kb = FactBase::family();
        assert!(kb.siblings("mary", "mike"));
        assert!(kb.siblings("mike", "mary"));
        assert!(!kb.siblings("mary", "mary"));
        assert!(!kb.siblings("alice", "bob"));
        assert_eq!(kb.siblings_of("mary"), vec!["mike"]);
        assert!(kb.siblings_of("alice").is_empty());
    }

    #[test]
    fn test_grandparents() {
        let kb = FactBase::family();
        assert!(kb.grandparent("john", "alice"));
        assert!(kb.grandparent("susan", "bob"));
        assert!(!kb.grandparent("mary", "alice"));
        assert!(!kb.grandparent("alice", "john"));
        assert_eq!(kb.grandchildren_of("john"), vec!["alice", "bob"]);
        assert!(kb.grandchildren_of("mary").is_empty());
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let mut kb = FactBase::family();
        assert!(!kb.add_parent("john", "mary"));
        assert!(kb.add_parent("alice", "zoe"));
        assert_eq!(kb.len(), 7);
        assert!(kb.grandparent("mary", "zoe"));
    }

    #[test]
    fn test_parse_fact_file() {
        let text = "% the Smiths\n\
                    parent(john, mary).\n\
                    parent( mary , alice ) # inline\n\
                    \n\
                    parent(John, Mary).\n";
        let kb: FactBase = text.parse().unwrap();
        assert_eq!(kb.len(), 2);
        assert!(kb.grandparent("john", "alice"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "parent(john, mary).\nchild(mary, john).".parse::<FactBase>(),
            Err(FactsError::Syntax {
                line: 2,
                text: "child(mary, john).".to_string()
            })
        );
        assert_eq!(
            "parent(john mary).".parse::<FactBase>(),
            Err(FactsError::Syntax {
                line: 1,
                text: "parent(john mary).".to_string()
            })
        );
        assert_eq!(
            "parent(Ann, ann).".parse::<FactBase>(),
            Err(FactsError::SelfParent {
                line: 1,
                name: "ann".to_string()
            })
        );
    }
}
