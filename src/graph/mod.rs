#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Shortest paths on a weighted directed graph with A*.
//!
//! A [`Graph`] stores directed edges with non-negative costs and a table of
//! heuristic estimates (the straight-line style guess of the remaining
//! distance to the goal the table was written for). [`Route`] turns a graph,
//! a start and a goal into an [`InformedProblem`].
//!
//! Graphs can be written in a small line-based text format:
//!
//! ```text
//! # comment
//! edge A B 1
//! edge B G 2.5
//! h A 3
//! h B 2
//! ```

use crate::search::astar::a_star;
use crate::search::{InformedProblem, SearchProblem, SearchStats, Solution, Successors};
use itertools::Itertools;
use log::warn;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use std::str::FromStr;
use thiserror::Error;

/// Edge and path cost.
pub type Cost = OrderedFloat<f64>;

/// Errors produced while reading the text format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A line did not match `edge <from> <to> <cost>` or `h <node> <estimate>`.
    #[error("line {line}: expected `edge <from> <to> <cost>` or `h <node> <estimate>`, found '{text}'")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// A cost or estimate was not a number.
    #[error("line {line}: '{value}' is not a number")]
    InvalidNumber {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        value: String,
    },
    /// A cost or estimate was negative or not finite.
    #[error("line {line}: {value} must be a finite, non-negative number")]
    OutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        value: String,
    },
}

/// A weighted directed graph with per-node heuristic estimates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    edges: FxHashMap<String, Vec<(String, Cost)>>,
    estimates: FxHashMap<String, Cost>,
}

impl Graph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample graph from A to G used by the interactive menu.
    #[must_use]
    pub fn example() -> Self {
        let mut graph = Self::new();
        for (from, to, cost) in [
            ("A", "B", 1.0),
            ("A", "C", 3.0),
            ("B", "D", 3.0),
            ("B", "E", 1.0),
            ("C", "F", 5.0),
            ("D", "G", 2.0),
            ("E", "G", 2.0),
            ("F", "G", 1.0),
        ] {
            graph.add_edge(from, to, cost);
        }
        for (node, h) in [
            ("A", 7.0),
            ("B", 6.0),
            ("C", 4.0),
            ("D", 2.0),
            ("E", 1.0),
            ("F", 2.0),
            ("G", 0.0),
        ] {
            graph.set_estimate(node, h);
        }
        graph
    }

    /// Adds the directed edge `from -> to`. Edges keep insertion order.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, cost: f64) {
        let to = to.into();
        self.edges.entry(to.clone()).or_default();
        self.edges
            .entry(from.into())
            .or_default()
            .push((to, OrderedFloat(cost)));
    }

    /// Sets the heuristic estimate of `node`.
    pub fn set_estimate(&mut self, node: impl Into<String>, estimate: f64) {
        self.estimates.insert(node.into(), OrderedFloat(estimate));
    }

    /// Outgoing edges of `node`; empty for unknown nodes.
    #[must_use]
    pub fn neighbors(&self, node: &str) -> &[(String, Cost)] {
        self.edges.get(node).map_or(&[][..], Vec::as_slice)
    }

    /// Heuristic estimate of `node`; zero (trivially admissible) when unset.
    #[must_use]
    pub fn estimate(&self, node: &str) -> Cost {
        self.estimates.get(node).copied().unwrap_or_default()
    }

    /// Whether `node` is an endpoint of some edge.
    #[must_use]
    pub fn contains(&self, node: &str) -> bool {
        self.edges.contains_key(node)
    }

    /// All nodes, sorted by name.
    #[must_use]
    pub fn nodes(&self) -> Vec<&str> {
        self.edges.keys().map(String::as_str).sorted().collect()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}

fn parse_number(line: usize, token: &str) -> Result<f64, GraphError> {
    let value = token.parse::<f64>().map_err(|_| GraphError::InvalidNumber {
        line,
        value: token.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(GraphError::OutOfRange {
            line,
            value: token.to_string(),
        });
    }
    Ok(value)
}

impl FromStr for Graph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut graph = Self::new();
        for (idx, raw) in s.lines().enumerate() {
            let line = idx + 1;
            let text = raw.split('#').next().unwrap_or_default().trim();
            if text.is_empty() {
                continue;
            }
            let tokens = text.split_whitespace().collect_vec();
            match tokens.as_slice() {
                ["edge", from, to, cost] => {
                    let cost = parse_number(line, cost)?;
                    graph.add_edge(*from, *to, cost);
                }
                ["h", node, estimate] => {
                    let estimate = parse_number(line, estimate)?;
                    graph.set_estimate(*node, estimate);
                }
                _ => {
                    return Err(GraphError::Syntax {
                        line,
                        text: text.to_string(),
                    });
                }
            }
        }
        Ok(graph)
    }
}

/// A start/goal query against a [`Graph`].
#[derive(Debug, Clone)]
pub struct Route<'a> {
    graph: &'a Graph,
    start: String,
    goal: String,
}

impl<'a> Route<'a> {
    /// A search from `start` to `goal` over `graph`.
    pub fn new(graph: &'a Graph, start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            graph,
            start: start.into(),
            goal: goal.into(),
        }
    }
}

impl SearchProblem for Route<'_> {
    type State = String;
    type Cost = Cost;

    fn initial_state(&self) -> String {
        self.start.clone()
    }

    fn is_goal(&self, state: &String) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &String) -> Successors<String, Cost> {
        self.graph.neighbors(state).iter().cloned().collect()
    }
}

impl InformedProblem for Route<'_> {
    fn heuristic(&self, state: &String) -> Cost {
        self.graph.estimate(state)
    }
}

/// Cheapest path from `start` to `goal` found by A*.
///
/// The stored estimates are assumed to describe distances to `goal`.
#[must_use]
pub fn shortest_path(
    graph: &Graph,
    start: &str,
    goal: &str,
) -> (Option<Solution<String, Cost>>, SearchStats) {
    for node in [start, goal] {
        if !graph.contains(node) {
            warn!("node '{node}' does not appear in the graph");
        }
    }
    a_star(&Route::new(graph, start, goal))
}
