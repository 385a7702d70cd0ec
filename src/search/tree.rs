//! Arena of search nodes with parent links.
//!
//! Frontiers hold node indices instead of whole paths; the path to a goal is
//! rebuilt once by walking parents.

#[derive(Debug, Clone)]
struct Node<S, C> {
    state: S,
    parent: Option<usize>,
    cost: C,
    depth: usize,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchTree<S, C> {
    nodes: Vec<Node<S, C>>,
}

impl<S: Clone, C: Copy> SearchTree<S, C> {
    pub(crate) const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn push(&mut self, state: S, parent: Option<usize>, cost: C) -> usize {
        let depth = parent.map_or(0, |p| self.nodes[p].depth + 1);
        self.nodes.push(Node {
            state,
            parent,
            cost,
            depth,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn state(&self, node: usize) -> &S {
        &self.nodes[node].state
    }

    pub(crate) fn cost(&self, node: usize) -> C {
        self.nodes[node].cost
    }

    pub(crate) fn depth(&self, node: usize) -> usize {
        self.nodes[node].depth
    }

    /// States from the root to `node`, inclusive.
    pub(crate) fn path_to(&self, node: usize) -> Vec<S> {
        let mut path = Vec::with_capacity(self.nodes[node].depth + 1);
        let mut current = Some(node);
        while let Some(idx) = current {
            path.push(self.nodes[idx].state.clone());
            current = self.nodes[idx].parent;
        }
        path.reverse();
        path
    }
}
