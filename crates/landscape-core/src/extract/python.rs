//! Python extractor using tree-sitter.
//!
//! Extraction runs in four passes over one syntax tree: classes (with their
//! endpoint methods), module-level functions, imports, then call sites.

use serde_json::Value;
use tree_sitter::Node as TsNode;

use super::treesitter::TreeSitterParser;
use super::vocabulary::{
    role_by_substring, API_CALL_MODULES, API_CALL_NAMES, API_FETCH_FUNCTIONS, DB_READ_METHODS,
    DB_WRITE_METHODS, DEFAULT_HTTP_METHOD, ENDPOINT_DECORATORS, HTTP_METHODS, IGNORED_BASES,
    MODEL_BASES, PYTHON_CLASS_ROLES, PYTHON_EXTENSIONS, ROUTER_NAMES, TASK_DECORATORS,
};
use super::{file_node, Extractor, LanguageFamily};
use crate::discovery::FileDescriptor;
use crate::error::ExtractError;
use crate::graph::{module_id, Edge, EdgeType, Graph, Node, NodeType};

/// Python extractor.
pub struct PythonExtractor {
    base: TreeSitterParser,
}

impl PythonExtractor {
    pub fn new() -> Self {
        Self {
            base: TreeSitterParser::new(
                tree_sitter_python::LANGUAGE.into(),
                "Python",
                PYTHON_EXTENSIONS,
            ),
        }
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PythonExtractor {
    fn extract(&self, file: &FileDescriptor, content: &str) -> Result<Graph, ExtractError> {
        let tree = self.base.parse_strict(&file.rel_path, content)?;
        let root = tree.root_node();

        let mut syntax = SyntaxIndex::default();
        preorder(root, |node| match node.kind() {
            "class_definition" => syntax.classes.push(node),
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                syntax.imports.push(node)
            }
            "call" => syntax.calls.push(node),
            _ => {}
        });

        let mut fragment = Fragment {
            file,
            content,
            file_id: file.node_id(),
            graph: Graph::new(),
        };
        fragment.graph.add_node(file_node(file));

        for class in &syntax.classes {
            fragment.class(class);
        }
        for function in top_level_functions(&root) {
            fragment.module_function(&function);
        }
        for import in &syntax.imports {
            fragment.import(import);
        }
        for call in &syntax.calls {
            fragment.call(call);
        }

        Ok(fragment.graph)
    }

    fn family(&self) -> LanguageFamily {
        LanguageFamily::Python
    }

    fn supported_extensions(&self) -> &[&'static str] {
        self.base.extensions()
    }
}

#[derive(Default)]
struct SyntaxIndex<'t> {
    classes: Vec<TsNode<'t>>,
    imports: Vec<TsNode<'t>>,
    calls: Vec<TsNode<'t>>,
}

/// Visit every node under `root` (inclusive) in document order.
fn preorder<'t>(root: TsNode<'t>, mut visit: impl FnMut(TsNode<'t>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Function definitions directly in the module body, decorated or not.
fn top_level_functions<'t>(root: &TsNode<'t>) -> Vec<TsNode<'t>> {
    TreeSitterParser::named_children(root)
        .into_iter()
        .filter_map(|child| match child.kind() {
            "function_definition" => Some(child),
            "decorated_definition" => child
                .child_by_field_name("definition")
                .filter(|def| def.kind() == "function_definition"),
            _ => None,
        })
        .collect()
}

fn is_async(function: &TsNode) -> bool {
    function.child(0).is_some_and(|first| first.kind() == "async")
}

fn guess_http_method(decorators: &[String]) -> String {
    decorators
        .iter()
        .map(|d| d.to_lowercase())
        .find(|d| HTTP_METHODS.contains(&d.as_str()))
        .map(|d| d.to_uppercase())
        .unwrap_or_else(|| DEFAULT_HTTP_METHOD.to_string())
}

fn any_in(names: &[String], vocabulary: &[&str]) -> bool {
    names.iter().any(|n| vocabulary.contains(&n.as_str()))
}

fn string_list(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

/// Per-file extraction state.
struct Fragment<'a> {
    file: &'a FileDescriptor,
    content: &'a str,
    file_id: String,
    graph: Graph,
}

impl Fragment<'_> {
    fn text(&self, node: &TsNode) -> &str {
        TreeSitterParser::node_text(node, self.content)
    }

    /// Decorator names of a class or function definition.
    ///
    /// `@app.get("/x")` yields `get`, `@shared_task` yields `shared_task`.
    fn decorator_names(&self, definition: &TsNode) -> Vec<String> {
        let Some(parent) = definition.parent().filter(|p| p.kind() == "decorated_definition")
        else {
            return Vec::new();
        };

        TreeSitterParser::named_children(&parent)
            .iter()
            .filter(|c| c.kind() == "decorator")
            .filter_map(|decorator| decorator.named_child(0))
            .filter_map(|expr| {
                let target = if expr.kind() == "call" {
                    expr.child_by_field_name("function")?
                } else {
                    expr
                };
                self.terminal_name(&target)
            })
            .collect()
    }

    /// `name` for an identifier, the last segment for an attribute.
    fn terminal_name(&self, node: &TsNode) -> Option<String> {
        match node.kind() {
            "identifier" => Some(self.text(node).to_string()),
            "attribute" => node
                .child_by_field_name("attribute")
                .map(|attr| self.text(&attr).to_string()),
            _ => None,
        }
    }

    /// Dotted chain of an attribute expression (`models.Model`).
    ///
    /// Segments stop at the first non-name object, e.g. `get_base().Model` is `Model`.
    fn attribute_chain(&self, node: &TsNode) -> String {
        let mut parts = Vec::new();
        let mut current = *node;
        while current.kind() == "attribute" {
            if let Some(attr) = current.child_by_field_name("attribute") {
                parts.push(self.text(&attr).to_string());
            }
            match current.child_by_field_name("object") {
                Some(object) => current = object,
                None => break,
            }
        }
        if current.kind() == "identifier" {
            parts.push(self.text(&current).to_string());
        }
        parts.reverse();
        parts.join(".")
    }

    fn base_names(&self, class: &TsNode) -> Vec<String> {
        let Some(superclasses) = class.child_by_field_name("superclasses") else {
            return Vec::new();
        };

        TreeSitterParser::named_children(&superclasses)
            .iter()
            .filter_map(|base| match base.kind() {
                "identifier" => Some(self.text(base).to_string()),
                "attribute" => Some(self.attribute_chain(base)),
                _ => None,
            })
            .collect()
    }

    fn class(&mut self, class: &TsNode) {
        let Some(name_node) = class.child_by_field_name("name") else {
            return;
        };
        let name = self.text(&name_node).to_string();
        let class_id = format!("class:{}:{}", self.file.rel_path, name);
        let decorators = self.decorator_names(class);
        let bases = self.base_names(class);

        let role = if any_in(&bases, MODEL_BASES) {
            NodeType::Model
        } else if ROUTER_NAMES.contains(&name.as_str()) || any_in(&bases, ROUTER_NAMES) {
            NodeType::Router
        } else {
            role_by_substring(&name, PYTHON_CLASS_ROLES).unwrap_or(NodeType::Class)
        };

        self.graph.add_node(
            Node::new(&class_id, &name, role)
                .at(&self.file.rel_path, TreeSitterParser::node_line(class))
                .with_meta("bases", string_list(&bases))
                .with_meta("decorators", string_list(&decorators)),
        );
        self.graph
            .add_edge(Edge::new(&self.file_id, &class_id, EdgeType::Uses));

        for base in bases.iter().filter(|b| !IGNORED_BASES.contains(&b.as_str())) {
            let reference = Node::class_ref(base);
            let ref_id = reference.id.clone();
            self.graph.add_node(reference);
            self.graph
                .add_edge_deferred(Edge::new(&class_id, ref_id, EdgeType::Inherits));
        }

        let mut methods = Vec::new();
        preorder(*class, |node| {
            if node.kind() == "function_definition" {
                methods.push(node);
            }
        });
        for method in &methods {
            self.endpoint_method(&name, &class_id, method);
        }
    }

    fn endpoint_method(&mut self, class_name: &str, class_id: &str, method: &TsNode) {
        let decorators = self.decorator_names(method);
        if !any_in(&decorators, ENDPOINT_DECORATORS) {
            return;
        }
        let Some(name_node) = method.child_by_field_name("name") else {
            return;
        };
        let label = format!("{}.{}", class_name, self.text(&name_node));
        let endpoint_id = format!("endpoint:{}:{}", self.file.rel_path, label);

        self.graph.add_node(
            Node::new(&endpoint_id, label, NodeType::Endpoint)
                .at(&self.file.rel_path, TreeSitterParser::node_line(method))
                .with_meta("method", guess_http_method(&decorators)),
        );
        self.graph
            .add_edge(Edge::new(class_id, &endpoint_id, EdgeType::EndpointHandler));
    }

    fn module_function(&mut self, function: &TsNode) {
        let Some(name_node) = function.child_by_field_name("name") else {
            return;
        };
        let name = self.text(&name_node).to_string();
        let func_id = format!("func:{}:{}", self.file.rel_path, name);
        let decorators = self.decorator_names(function);

        let role = if any_in(&decorators, ENDPOINT_DECORATORS) {
            NodeType::Endpoint
        } else if any_in(&decorators, TASK_DECORATORS) {
            NodeType::Task
        } else if name.to_lowercase().contains("middleware") {
            NodeType::Middleware
        } else {
            NodeType::Function
        };

        self.graph.add_node(
            Node::new(&func_id, &name, role)
                .at(&self.file.rel_path, TreeSitterParser::node_line(function))
                .with_meta("decorators", string_list(&decorators))
                .with_meta("is_async", is_async(function)),
        );
        self.graph
            .add_edge(Edge::new(&self.file_id, &func_id, EdgeType::Uses));

        if role == NodeType::Endpoint {
            self.graph
                .add_edge(Edge::new(&self.file_id, &func_id, EdgeType::EndpointHandler));
        }
    }

    fn import(&mut self, statement: &TsNode) {
        let modules: Vec<String> = match statement.kind() {
            "import_statement" => TreeSitterParser::named_children(statement)
                .iter()
                .filter_map(|child| match child.kind() {
                    "dotted_name" => Some(self.text(child).to_string()),
                    "aliased_import" => child
                        .child_by_field_name("name")
                        .map(|name| self.text(&name).to_string()),
                    _ => None,
                })
                .collect(),
            "import_from_statement" => statement
                .child_by_field_name("module_name")
                .and_then(|module| self.from_module(&module))
                .into_iter()
                .collect(),
            "future_import_statement" => vec!["__future__".to_string()],
            _ => Vec::new(),
        };

        for module in modules {
            self.graph.add_edge_deferred(Edge::new(
                &self.file_id,
                module_id(&module),
                EdgeType::Imports,
            ));
        }
    }

    /// Module named by `from X import ...`, without relative dots.
    ///
    /// `from . import x` names no module and yields `None`.
    fn from_module(&self, module: &TsNode) -> Option<String> {
        match module.kind() {
            "dotted_name" => Some(self.text(module).to_string()),
            "relative_import" => TreeSitterParser::named_children(module)
                .iter()
                .find(|c| c.kind() == "dotted_name")
                .map(|name| self.text(name).to_string()),
            _ => None,
        }
    }

    fn call(&mut self, call: &TsNode) {
        let Some(function) = call.child_by_field_name("function") else {
            return;
        };

        match function.kind() {
            "attribute" => {
                let Some(method) = function
                    .child_by_field_name("attribute")
                    .map(|attr| self.text(&attr).to_string())
                else {
                    return;
                };
                let object = function
                    .child_by_field_name("object")
                    .filter(|obj| obj.kind() == "identifier")
                    .map(|obj| self.text(&obj).to_string())
                    .unwrap_or_default();

                let db_edge = if DB_READ_METHODS.contains(&method.as_str()) {
                    Some(EdgeType::DbRead)
                } else if DB_WRITE_METHODS.contains(&method.as_str()) {
                    Some(EdgeType::DbWrite)
                } else {
                    None
                };
                if let Some(edge_type) = db_edge {
                    self.graph.add_edge_deferred(
                        Edge::marker(&self.file_id, edge_type)
                            .with_meta("method", method.as_str())
                            .with_meta("object", object.as_str()),
                    );
                }

                if API_CALL_MODULES.contains(&object.as_str())
                    && API_CALL_NAMES.contains(&method.as_str())
                {
                    self.graph.add_edge_deferred(
                        Edge::marker(&self.file_id, EdgeType::ApiCall)
                            .with_meta("method", method.as_str())
                            .with_meta("module", object.as_str()),
                    );
                }
            }
            "identifier" => {
                let name = self.text(&function).to_string();
                if API_FETCH_FUNCTIONS.contains(&name.as_str()) {
                    self.graph.add_edge_deferred(
                        Edge::marker(&self.file_id, EdgeType::ApiCall).with_meta("function", name),
                    );
                }
            }
            _ => {}
        }
    }
}
