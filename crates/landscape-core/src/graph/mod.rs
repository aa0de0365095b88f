//! Structural graph: nodes, edges, identity rules and the output shape.
//!
//! # Components
//!
//! - [`Node`] / [`Edge`] - typed entities and relationships
//! - [`Graph`] - storage with first-wins ids and deferred edges
//! - [`GraphData`] - serialized result with degrees and per-type counts
//!
//! # Identity
//!
//! Ids embed the repository-relative path (`file:src/app.py`,
//! `class:src/app.py:User`), so entities from different files never collide.
//! Unresolved references use `module:<import text>` and `class_ref:<name>`;
//! a `class_ref` node is one placeholder shared by every file naming that base.

mod model;
mod output;
mod store;

pub use model::{
    class_ref_id, file_id, module_id, Edge, EdgeType, Metadata, Node, NodeType, MODULE_PREFIX,
};
pub use output::{GraphData, GraphStats, NodeEntry};
pub use store::Graph;
