//! Import resolution: rewrite `module:` placeholders to file ids.
//!
//! Each language family has its own resolver, built from that family's full
//! file set once every fragment has been merged. Resolvers only touch import
//! edges whose source file belongs to their family, and only rewrite targets;
//! edges left unresolved are dropped later by [`Graph::resolve_edges`].

mod python;
mod script;

pub use python::{module_path, PythonResolver};
pub use script::{normalize_join, ScriptResolver};

use crate::extract::LanguageFamily;
use crate::graph::Graph;

/// Maps unresolved import text to a file id for one language family.
pub trait ImportResolver: Send + Sync {
    /// Family whose imports this resolver handles.
    fn family(&self) -> LanguageFamily;

    /// Whether the file node `source_id` belongs to this resolver's family.
    fn owns(&self, source_id: &str) -> bool;

    /// File id imported by `module` from `source_id`, if any.
    fn resolve(&self, source_id: &str, module: &str) -> Option<String>;
}

/// Rewrite every unresolved import edge owned by `resolver`.
///
/// Returns the number of edges rewritten.
pub fn apply(resolver: &dyn ImportResolver, graph: &mut Graph) -> usize {
    let mut rewritten = 0;

    for edge in graph.edges_mut() {
        let Some(module) = edge.unresolved_module() else {
            continue;
        };
        if !resolver.owns(&edge.source) {
            continue;
        }
        if let Some(target) = resolver.resolve(&edge.source, module) {
            edge.target = target;
            rewritten += 1;
        }
    }

    rewritten
}
