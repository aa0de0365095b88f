//! Graph storage with first-wins node identity and deferred edges.
//!
//! Edges are kept in one list. Edges added through [`Graph::add_edge`] are
//! checked against the node set at insertion time; edges added through
//! [`Graph::add_edge_deferred`] are not, and stay unchecked until the single
//! terminal [`Graph::resolve_edges`] pass. The node set only grows while the
//! graph is built, so one final check is enough.

use std::collections::{HashMap, HashSet};

use super::model::{Edge, EdgeType, Node};

/// A structural graph (or a per-file fragment of one).
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless its id is already present.
    ///
    /// Returns `false` when the id was taken; the existing node is left untouched.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Insert an edge whose endpoints both exist already; drop it otherwise.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if self.contains_node(&edge.source) && self.contains_node(&edge.target) {
            self.edges.push(edge);
            true
        } else {
            false
        }
    }

    /// Insert an edge without checking its endpoints.
    pub fn add_edge_deferred(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// Union another graph into this one.
    ///
    /// Nodes follow the first-wins rule; edges are appended as-is and only
    /// deduplicated by [`Graph::resolve_edges`].
    pub fn merge(&mut self, other: Graph) {
        for node in other.nodes {
            self.add_node(node);
        }
        self.edges.extend(other.edges);
    }

    /// Drop dangling edges and duplicate `(source, target, type)` triples.
    ///
    /// Run once, after every resolver pass. Returns the number of edges dropped.
    pub fn resolve_edges(&mut self) -> usize {
        let before = self.edges.len();
        let index = &self.index;
        let mut seen: HashSet<(String, String, EdgeType)> = HashSet::new();

        self.edges.retain(|edge| {
            index.contains_key(&edge.source)
                && index.contains_key(&edge.target)
                && seen.insert((edge.source.clone(), edge.target.clone(), edge.edge_type))
        });

        before - self.edges.len()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Mutable edge access for resolver passes (target rewriting only).
    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
