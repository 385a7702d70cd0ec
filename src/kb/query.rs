//! A tiny word-based query language over a [`FactBase`].
//!
//! ```text
//! parents of mary
//! children of john
//! siblings of mary
//! grandchildren of john
//! siblings mary and mike
//! grandparent john of alice
//! ```
//!
//! Queries are case-insensitive. In the two-name forms the connector word
//! (`and`, `of`) is optional: `siblings mary mike` works too. A leading `of`
//! is also accepted there (`siblings of mary and mike`).

use crate::kb::facts::FactBase;
use itertools::Itertools;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The one error a query can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Query not understood.")]
pub struct QueryError;

/// A parsed query. Names are lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// `parents of X`
    ParentsOf(String),
    /// `children of X`
    ChildrenOf(String),
    /// `siblings of X`
    SiblingsOf(String),
    /// `grandchildren of X`
    GrandchildrenOf(String),
    /// Are the two people siblings?
    Siblings(String, String),
    /// Is the first person a grandparent of the second?
    Grandparent(String, String),
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        let tokens = lowered.split_whitespace().collect_vec();
        let query = match tokens.as_slice() {
            ["parents", "of", x] => Self::ParentsOf((*x).to_string()),
            ["children", "of", x] => Self::ChildrenOf((*x).to_string()),
            ["siblings", "of", x] => Self::SiblingsOf((*x).to_string()),
            ["grandchildren", "of", x] => Self::GrandchildrenOf((*x).to_string()),
            ["siblings", x, "and", y]
            | ["siblings", x, y]
            | ["siblings", "of", x, "and", y] => {
                Self::Siblings((*x).to_string(), (*y).to_string())
            }
            ["grandparent", x, "of", y]
            | ["grandparent", x, y]
            | ["grandparent", "of", x, "of", y] => {
                Self::Grandparent((*x).to_string(), (*y).to_string())
            }
            _ => return Err(QueryError),
        };
        Ok(query)
    }
}

/// What a query evaluates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Everyone matching the query, in fact order.
    People(Vec<String>),
    /// The answer to a yes/no query.
    Truth(bool),
}

impl Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::People(people) if people.is_empty() => write!(f, "nobody"),
            Self::People(people) => write!(f, "{}", people.iter().join(", ")),
            Self::Truth(true) => write!(f, "yes"),
            Self::Truth(false) => write!(f, "no"),
        }
    }
}

impl Query {
    /// Evaluates the query against `kb`.
    #[must_use]
    pub fn answer(&self, kb: &FactBase) -> Answer {
        match self {
            Self::ParentsOf(x) => Answer::People(kb.parents_of(x)),
            Self::ChildrenOf(x) => Answer::People(kb.children_of(x)),
            Self::SiblingsOf(x) => Answer::People(kb.siblings_of(x)),
            Self::GrandchildrenOf(x) => Answer::People(kb.grandchildren_of(x)),
            Self::Siblings(x, y) => Answer::Truth(kb.siblings(x, y)),
            Self::Grandparent(x, y) => Answer::Truth(kb.grandparent(x, y)),
        }
    }
}

/// Parses and answers `text` in one step.
///
/// # Errors
///
/// [`QueryError`] if `text` matches none of the query forms.
pub fn ask(kb: &FactBase, text: &str) -> Result<Answer, QueryError> {
    text.parse::<Query>().map(|query| query.answer(kb))
}
