//! Node and edge types of the structural graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form per-node / per-edge metadata.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Role of a node in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Endpoint,
    File,
    Class,
    Function,
    Router,
    Model,
    Service,
    Utility,
    Middleware,
    Task,
    Config,
    Test,
    Component,
    Module,
}

impl NodeType {
    pub const ALL: [NodeType; 14] = [
        NodeType::Endpoint,
        NodeType::File,
        NodeType::Class,
        NodeType::Function,
        NodeType::Router,
        NodeType::Model,
        NodeType::Service,
        NodeType::Utility,
        NodeType::Middleware,
        NodeType::Task,
        NodeType::Config,
        NodeType::Test,
        NodeType::Component,
        NodeType::Module,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Endpoint => "endpoint",
            NodeType::File => "file",
            NodeType::Class => "class",
            NodeType::Function => "function",
            NodeType::Router => "router",
            NodeType::Model => "model",
            NodeType::Service => "service",
            NodeType::Utility => "utility",
            NodeType::Middleware => "middleware",
            NodeType::Task => "task",
            NodeType::Config => "config",
            NodeType::Test => "test",
            NodeType::Component => "component",
            NodeType::Module => "module",
        }
    }

    /// Hex color used by the front end legend.
    pub fn color(&self) -> &'static str {
        match self {
            NodeType::Endpoint => "#00bcd4",
            NodeType::File => "#66bb6a",
            NodeType::Class => "#ffa726",
            NodeType::Function => "#42a5f5",
            NodeType::Router => "#ef5350",
            NodeType::Model => "#ec407a",
            NodeType::Service => "#26a69a",
            NodeType::Utility => "#78909c",
            NodeType::Middleware => "#ab47bc",
            NodeType::Task => "#ff7043",
            NodeType::Config => "#8d6e63",
            NodeType::Test => "#9ccc65",
            NodeType::Component => "#29b6f6",
            NodeType::Module => "#d4e157",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    Imports,
    Calls,
    Inherits,
    EndpointHandler,
    DbRead,
    DbWrite,
    ApiCall,
    Uses,
    MiddlewareChain,
}

impl EdgeType {
    pub const ALL: [EdgeType; 9] = [
        EdgeType::Imports,
        EdgeType::Calls,
        EdgeType::Inherits,
        EdgeType::EndpointHandler,
        EdgeType::DbRead,
        EdgeType::DbWrite,
        EdgeType::ApiCall,
        EdgeType::Uses,
        EdgeType::MiddlewareChain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Imports => "imports",
            EdgeType::Calls => "calls",
            EdgeType::Inherits => "inherits",
            EdgeType::EndpointHandler => "endpoint_handler",
            EdgeType::DbRead => "db_read",
            EdgeType::DbWrite => "db_write",
            EdgeType::ApiCall => "api_call",
            EdgeType::Uses => "uses",
            EdgeType::MiddlewareChain => "middleware_chain",
        }
    }

    /// Hex color used by the front end legend.
    pub fn color(&self) -> &'static str {
        match self {
            EdgeType::Imports => "#4fc3f7",
            EdgeType::Calls => "#81c784",
            EdgeType::Inherits => "#ffb74d",
            EdgeType::EndpointHandler => "#e57373",
            EdgeType::DbRead => "#4dd0e1",
            EdgeType::DbWrite => "#f06292",
            EdgeType::ApiCall => "#aed581",
            EdgeType::Uses => "#90a4ae",
            EdgeType::MiddlewareChain => "#ce93d8",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix of unresolved import placeholders.
pub const MODULE_PREFIX: &str = "module:";

/// Id of the file node for a repository-relative path.
pub fn file_id(rel_path: &str) -> String {
    format!("file:{}", rel_path)
}

/// Id of the unresolved placeholder for an import target.
pub fn module_id(target: &str) -> String {
    format!("{}{}", MODULE_PREFIX, target)
}

/// Id of the shared external base-class reference.
pub fn class_ref_id(name: &str) -> String {
    format!("class_ref:{}", name)
}

/// A typed entity in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Global identity key.
    pub id: String,
    /// Display label.
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Repository-relative path, empty for external references.
    pub file_path: String,
    /// 1-based line, 0 when unknown.
    pub line_number: u32,
    pub metadata: Metadata,
}

impl Node {
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            file_path: String::new(),
            line_number: 0,
            metadata: Metadata::new(),
        }
    }

    /// Bind the node to a source location.
    pub fn at(mut self, file_path: impl Into<String>, line_number: u32) -> Self {
        self.file_path = file_path.into();
        self.line_number = line_number;
        self
    }

    /// Attach one metadata entry.
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// External base-class reference shared across files.
    pub fn class_ref(name: &str) -> Self {
        Self::new(class_ref_id(name), name, NodeType::Class).with_meta("external_ref", true)
    }
}

/// A typed, directed relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    pub metadata: Metadata,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, edge_type: EdgeType) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            edge_type,
            metadata: Metadata::new(),
        }
    }

    /// Self-referencing marker on a file ("this file touches X").
    pub fn marker(file_id: &str, edge_type: EdgeType) -> Self {
        Self::new(file_id, file_id, edge_type)
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Import target text when the edge still points at a placeholder.
    pub fn unresolved_module(&self) -> Option<&str> {
        if self.edge_type != EdgeType::Imports {
            return None;
        }
        self.target.strip_prefix(MODULE_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serializes_type_field() {
        let node = Node::new("file:a.py", "a.py", NodeType::File).at("a.py", 0);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "file");
        assert_eq!(json["file_path"], "a.py");
        assert_eq!(json["line_number"], 0);
    }

    #[test]
    fn test_edge_type_snake_case() {
        let edge = Edge::new("a", "b", EdgeType::EndpointHandler);
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["type"], "endpoint_handler");
        assert_eq!(EdgeType::DbWrite.to_string(), "db_write");
    }

    #[test]
    fn test_unresolved_module() {
        let edge = Edge::new("file:a.py", module_id("pkg.mod"), EdgeType::Imports);
        assert_eq!(edge.unresolved_module(), Some("pkg.mod"));

        let marker = Edge::marker("file:a.py", EdgeType::DbRead);
        assert_eq!(marker.unresolved_module(), None);
    }

    #[test]
    fn test_class_ref_is_external() {
        let node = Node::class_ref("Base");
        assert_eq!(node.id, "class_ref:Base");
        assert_eq!(node.node_type, NodeType::Class);
        assert_eq!(node.metadata["external_ref"], true);
        assert!(node.file_path.is_empty());
    }
}
