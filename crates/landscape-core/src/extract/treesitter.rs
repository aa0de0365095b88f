//! Tree-sitter helpers shared by syntax-tree extractors.

use tree_sitter::{Language, Node, Parser as TSParser, Tree};

use crate::error::ExtractError;

/// A tree-sitter grammar bound to the extensions it handles.
pub struct TreeSitterParser {
    language: Language,
    language_name: &'static str,
    extensions: &'static [&'static str],
}

impl TreeSitterParser {
    pub fn new(
        language: Language,
        language_name: &'static str,
        extensions: &'static [&'static str],
    ) -> Self {
        Self {
            language,
            language_name,
            extensions,
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    /// Parse source code into a syntax tree.
    ///
    /// A parser is created per call; `tree_sitter::Parser` is not `Sync`.
    pub fn parse_tree(&self, path: &str, content: &str) -> Result<Tree, ExtractError> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Grammar(format!("{}: {}", self.language_name, e)))?;

        parser
            .parse(content, None)
            .ok_or_else(|| ExtractError::parse(path, "parser returned no tree"))
    }

    /// Parse and reject trees containing syntax errors.
    pub fn parse_strict(&self, path: &str, content: &str) -> Result<Tree, ExtractError> {
        let tree = self.parse_tree(path, content)?;
        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(&root).unwrap_or(0);
            return Err(ExtractError::parse(
                path,
                format!("syntax error near line {}", line),
            ));
        }
        Ok(tree)
    }

    /// Get text for a node from source content.
    pub fn node_text<'a>(node: &Node, content: &'a str) -> &'a str {
        &content[node.byte_range()]
    }

    /// Get line number (1-based) for a node.
    pub fn node_line(node: &Node) -> u32 {
        node.start_position().row as u32 + 1
    }

    /// Named children of a node.
    pub fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.named_children(&mut cursor).collect()
    }
}

fn first_error_line(node: &Node) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return Some(TreeSitterParser::node_line(node));
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .iter()
        .filter(|c| c.has_error())
        .find_map(first_error_line)
}
