//! Fallback extractor for files without a dedicated language family.

use std::collections::BTreeSet;

use super::patterns::{first_captures, GENERIC_IMPORTS};
use super::{file_node, Extractor, LanguageFamily};
use crate::config::DEFAULT_GENERIC_READ_LIMIT;
use crate::discovery::FileDescriptor;
use crate::error::ExtractError;
use crate::graph::{module_id, Edge, EdgeType, Graph};

/// Classifies the file by path and scans a bounded prefix for import-like lines.
#[derive(Debug, Clone)]
pub struct GenericExtractor {
    read_limit: usize,
}

impl GenericExtractor {
    pub fn new() -> Self {
        Self::with_read_limit(DEFAULT_GENERIC_READ_LIMIT)
    }

    pub fn with_read_limit(read_limit: usize) -> Self {
        Self { read_limit }
    }

    /// Distinct import targets found in `content`, in sorted order.
    pub fn import_targets(content: &str) -> BTreeSet<String> {
        GENERIC_IMPORTS
            .iter()
            .flat_map(|pattern| {
                first_captures(pattern.regex, content)
                    .into_iter()
                    .map(move |(_, target)| match pattern.rewrite {
                        Some(rewrite) => rewrite(target),
                        None => target.to_string(),
                    })
            })
            .collect()
    }
}

impl Default for GenericExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for GenericExtractor {
    fn extract(&self, file: &FileDescriptor, content: &str) -> Result<Graph, ExtractError> {
        let mut graph = Graph::new();
        let file_id = file.node_id();
        graph.add_node(file_node(file));

        for target in Self::import_targets(content) {
            graph.add_edge_deferred(Edge::new(&file_id, module_id(&target), EdgeType::Imports));
        }

        Ok(graph)
    }

    fn family(&self) -> LanguageFamily {
        LanguageFamily::Generic
    }

    /// Owns nothing explicitly; the registry falls back to it.
    fn supported_extensions(&self) -> &[&'static str] {
        &[]
    }

    fn read_limit(&self) -> Option<usize> {
        Some(self.read_limit)
    }
}
