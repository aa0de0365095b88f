//! Per-file entity extraction.
//!
//! Provides an [`Extractor`] trait turning one file into a graph fragment,
//! with one implementation per language family:
//!
//! - [`PythonExtractor`] - tree-sitter syntax tree, full fidelity
//! - [`ScriptExtractor`] - regex tables for JavaScript/TypeScript
//! - [`GenericExtractor`] - path classification plus generic import syntax
//!
//! Every fragment starts with the file node (see [`file_node`]). Extractors
//! only emit validated edges between nodes of their own fragment; anything
//! pointing across files goes in as a deferred edge.

mod generic;
mod patterns;
mod python;
mod registry;
mod script;
mod treesitter;
pub mod vocabulary;

pub use generic::GenericExtractor;
pub use python::PythonExtractor;
pub use registry::ExtractorRegistry;
pub use script::ScriptExtractor;

use std::fs::File;
use std::io::Read;

use crate::classify::classify;
use crate::discovery::FileDescriptor;
use crate::error::ExtractError;
use crate::graph::{Graph, Node};

/// Language families with their own extraction and import resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    /// Python, parsed into a syntax tree.
    Python,
    /// JavaScript/TypeScript, matched with regex tables.
    Script,
    /// Everything else.
    Generic,
}

impl LanguageFamily {
    pub fn name(&self) -> &'static str {
        match self {
            LanguageFamily::Python => "Python",
            LanguageFamily::Script => "JavaScript/TypeScript",
            LanguageFamily::Generic => "Generic",
        }
    }
}

/// Turns one source file into a graph fragment.
pub trait Extractor: Send + Sync {
    /// Extract the fragment for `file` from its decoded `content`.
    ///
    /// An `Err` discards the whole fragment; the caller keeps only the file node.
    fn extract(&self, file: &FileDescriptor, content: &str) -> Result<Graph, ExtractError>;

    /// Family this extractor belongs to.
    fn family(&self) -> LanguageFamily;

    /// File extensions (lowercase, without dot) this extractor owns.
    fn supported_extensions(&self) -> &[&'static str];

    /// Maximum bytes of the file to read, `None` for the whole file.
    fn read_limit(&self) -> Option<usize> {
        None
    }
}

/// The node every discovered file gets, typed by its path.
pub fn file_node(file: &FileDescriptor) -> Node {
    let extension = if file.extension.is_empty() {
        String::new()
    } else {
        format!(".{}", file.extension)
    };

    Node::new(
        file.node_id(),
        file.name.clone(),
        classify(&file.rel_path, &file.name, &file.extension),
    )
    .at(file.rel_path.clone(), 0)
    .with_meta("extension", extension)
}

/// Read a file as text, up to `limit` bytes. Invalid UTF-8 is replaced.
pub fn read_source(file: &FileDescriptor, limit: Option<usize>) -> Result<String, ExtractError> {
    let read_err = |source| ExtractError::Read {
        path: file.path.clone(),
        source,
    };

    let mut bytes = Vec::new();
    let mut handle = File::open(&file.path).map_err(read_err)?;
    let read = match limit {
        Some(limit) => handle.take(limit as u64).read_to_end(&mut bytes),
        None => handle.read_to_end(&mut bytes),
    };
    read.map_err(read_err)?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// 1-based line of a byte offset.
pub(crate) fn line_of(content: &str, offset: usize) -> u32 {
    content[..offset].matches('\n').count() as u32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeType;
    use std::path::Path;

    #[test]
    fn test_file_node_is_classified() {
        let file = FileDescriptor::new(Path::new("/r"), Path::new("/r/app/models/user.py"));
        let node = file_node(&file);
        assert_eq!(node.id, "file:app/models/user.py");
        assert_eq!(node.label, "user.py");
        assert_eq!(node.node_type, NodeType::Model);
        assert_eq!(node.metadata["extension"], ".py");
        assert_eq!(node.line_number, 0);
    }

    #[test]
    fn test_line_of() {
        let content = "a\nb\nc";
        assert_eq!(line_of(content, 0), 1);
        assert_eq!(line_of(content, 2), 2);
        assert_eq!(line_of(content, 4), 3);
    }

    #[test]
    fn test_read_source_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, "abcdefghij").unwrap();
        let file = FileDescriptor::new(dir.path(), &path);

        assert_eq!(read_source(&file, Some(4)).unwrap(), "abcd");
        assert_eq!(read_source(&file, None).unwrap(), "abcdefghij");
    }

    #[test]
    fn test_read_source_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.c");
        std::fs::write(&path, [b'o', b'k', 0xff, b'!']).unwrap();
        let file = FileDescriptor::new(dir.path(), &path);

        let text = read_source(&file, None).unwrap();
        assert!(text.starts_with("ok"));
        assert!(text.ends_with('!'));
    }
}
