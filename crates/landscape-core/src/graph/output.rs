//! Serialized graph shape handed to callers and the front end.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::model::{Edge, EdgeType, Node, NodeType};
use super::store::Graph;

// =============================================================================
// Output Models
// =============================================================================

/// Full analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<NodeEntry>,
    pub edges: Vec<Edge>,
    /// Legend colors per node type (presentation only).
    pub node_colors: BTreeMap<NodeType, String>,
    /// Legend colors per edge type (presentation only).
    pub edge_colors: BTreeMap<EdgeType, String>,
    pub node_type_counts: BTreeMap<NodeType, usize>,
    pub edge_type_counts: BTreeMap<EdgeType, usize>,
    pub stats: GraphStats,
    /// Name of the analyzed directory.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub repo_name: Option<String>,
}

/// A node plus its computed degree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    #[serde(flatten)]
    pub node: Node,
    /// Edges touching the node as source or target (self-loops count twice).
    pub degree: usize,
}

/// Summary totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
}

// =============================================================================
// Serialization
// =============================================================================

impl Graph {
    /// Snapshot the graph into its output shape.
    ///
    /// Expects [`Graph::resolve_edges`] to have run; edges are emitted as stored.
    pub fn serialize(&self) -> GraphData {
        let mut degree: HashMap<&str, usize> = HashMap::with_capacity(self.node_count());
        for edge in self.edges() {
            *degree.entry(edge.source.as_str()).or_default() += 1;
            *degree.entry(edge.target.as_str()).or_default() += 1;
        }

        let nodes = self
            .nodes()
            .iter()
            .map(|node| NodeEntry {
                degree: degree.get(node.id.as_str()).copied().unwrap_or(0),
                node: node.clone(),
            })
            .collect();

        let mut node_type_counts = BTreeMap::new();
        for node in self.nodes() {
            *node_type_counts.entry(node.node_type).or_insert(0) += 1;
        }

        let mut edge_type_counts = BTreeMap::new();
        for edge in self.edges() {
            *edge_type_counts.entry(edge.edge_type).or_insert(0) += 1;
        }

        GraphData {
            nodes,
            edges: self.edges().to_vec(),
            node_colors: NodeType::ALL
                .iter()
                .map(|t| (*t, t.color().to_string()))
                .collect(),
            edge_colors: EdgeType::ALL
                .iter()
                .map(|t| (*t, t.color().to_string()))
                .collect(),
            node_type_counts,
            edge_type_counts,
            stats: GraphStats {
                total_nodes: self.node_count(),
                total_edges: self.edge_count(),
            },
            repo_name: None,
        }
    }
}
