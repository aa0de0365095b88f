//! JavaScript/TypeScript extractor.
//!
//! No parser: every entity comes from a regex table in [`super::patterns`],
//! scanned over the whole file. Line numbers are derived from match offsets.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde_json::Value;

use super::patterns::{
    any_match, compiled, first_captures, API_CALLS, DB_READS, DB_WRITES, FUNCTION_DECLS,
    MODEL_DECLS, RE_CLASS_DECL, RE_ROUTE, RE_ROUTER_INIT, SCRIPT_IMPORTS,
};
use super::vocabulary::{
    role_by_substring, COMPONENT_EXTENSIONS, MOUNT_VERB, SCRIPT_CLASS_ROLES, SCRIPT_EXTENSIONS,
    SCRIPT_FUNCTION_ROLES,
};
use super::{file_node, line_of, Extractor, LanguageFamily};
use crate::discovery::FileDescriptor;
use crate::error::ExtractError;
use crate::graph::{module_id, Edge, EdgeType, Graph, Node, NodeType};

/// Regex-driven extractor for the script family.
#[derive(Debug, Default)]
pub struct ScriptExtractor;

impl ScriptExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for ScriptExtractor {
    fn extract(&self, file: &FileDescriptor, content: &str) -> Result<Graph, ExtractError> {
        let mut scan = Scan {
            file,
            content,
            file_id: file.node_id(),
            graph: Graph::new(),
        };
        scan.graph.add_node(file_node(file));

        scan.routes();
        scan.classes_and_functions();
        scan.models();
        scan.imports();
        scan.markers();
        scan.router();

        Ok(scan.graph)
    }

    fn family(&self) -> LanguageFamily {
        LanguageFamily::Script
    }

    fn supported_extensions(&self) -> &[&'static str] {
        SCRIPT_EXTENSIONS
    }
}

struct Scan<'a> {
    file: &'a FileDescriptor,
    content: &'a str,
    file_id: String,
    graph: Graph,
}

impl Scan<'_> {
    fn located(&self, node: Node, offset: usize) -> Node {
        node.at(&self.file.rel_path, line_of(self.content, offset))
    }

    fn add_owned(&mut self, node: Node, edge_type: EdgeType) {
        let id = node.id.clone();
        self.graph.add_node(node);
        self.graph.add_edge(Edge::new(&self.file_id, id, edge_type));
    }

    /// `app.get('/users', ...)` style registrations.
    fn routes(&mut self) {
        let Some(re) = compiled(&RE_ROUTE) else {
            return;
        };

        let found: Vec<(usize, String, String)> = re
            .captures_iter(self.content)
            .filter_map(|caps| {
                let start = caps.get(0)?.start();
                let verb = caps.get(1)?.as_str().to_string();
                let path = caps.get(2).map(|p| p.as_str().to_string()).unwrap_or_default();
                Some((start, verb, path))
            })
            .collect();

        for (offset, verb, path) in found {
            let method = verb.to_uppercase();
            let id = format!("endpoint:{}:{}:{}", self.file.rel_path, method, path);
            let label = if path.is_empty() {
                format!("{} (middleware)", method)
            } else {
                format!("{} {}", method, path)
            };
            let role = if verb == MOUNT_VERB {
                NodeType::Middleware
            } else {
                NodeType::Endpoint
            };

            let node = self
                .located(Node::new(id, label, role), offset)
                .with_meta("method", method)
                .with_meta("path", path);
            self.add_owned(node, EdgeType::EndpointHandler);
        }
    }

    fn classes_and_functions(&mut self) {
        let mut seen: HashSet<String> = HashSet::new();

        let classes: Vec<(usize, String, Option<String>)> = match compiled(&RE_CLASS_DECL) {
            Some(re) => re
                .captures_iter(self.content)
                .filter_map(|caps| {
                    let start = caps.get(0)?.start();
                    let name = caps.get(1)?.as_str().to_string();
                    let base = caps.get(2).map(|b| b.as_str().to_string());
                    Some((start, name, base))
                })
                .collect(),
            None => Vec::new(),
        };

        for (offset, name, base) in classes {
            let class_id = format!("class:{}:{}", self.file.rel_path, name);
            let role = role_by_substring(&name, SCRIPT_CLASS_ROLES).unwrap_or(NodeType::Class);
            let extends = base.clone().map(Value::String).unwrap_or(Value::Null);

            let node = self
                .located(Node::new(&class_id, &name, role), offset)
                .with_meta("extends", extends);
            self.add_owned(node, EdgeType::Uses);
            seen.insert(name);

            if let Some(base) = base {
                let reference = Node::class_ref(&base);
                let ref_id = reference.id.clone();
                self.graph.add_node(reference);
                self.graph
                    .add_edge_deferred(Edge::new(&class_id, ref_id, EdgeType::Inherits));
            }
        }

        let components_allowed = COMPONENT_EXTENSIONS.contains(&self.file.extension.as_str());

        for shape in FUNCTION_DECLS {
            for (offset, name) in first_captures(shape, self.content) {
                if !seen.insert(name.to_string()) {
                    continue;
                }

                let role = role_by_substring(name, SCRIPT_FUNCTION_ROLES).unwrap_or_else(|| {
                    if components_allowed && name.starts_with(|c: char| c.is_uppercase()) {
                        NodeType::Component
                    } else {
                        NodeType::Function
                    }
                });
                let func_id = format!("func:{}:{}", self.file.rel_path, name);
                let node = self.located(Node::new(func_id, name, role), offset);
                self.add_owned(node, EdgeType::Uses);
            }
        }
    }

    fn models(&mut self) {
        for shape in MODEL_DECLS {
            for (offset, name) in first_captures(shape, self.content) {
                let model_id = format!("model:{}:{}", self.file.rel_path, name);
                let node = self.located(Node::new(model_id, name, NodeType::Model), offset);
                self.add_owned(node, EdgeType::Uses);
            }
        }
    }

    fn imports(&mut self) {
        let specifiers: BTreeSet<&str> = SCRIPT_IMPORTS
            .iter()
            .flat_map(|shape| first_captures(shape, self.content))
            .map(|(_, specifier)| specifier)
            .collect();

        for specifier in specifiers {
            self.graph.add_edge_deferred(Edge::new(
                &self.file_id,
                module_id(specifier),
                EdgeType::Imports,
            ));
        }
    }

    /// One self-referencing edge per kind of outside contact, by presence.
    fn markers(&mut self) {
        let markers = [
            (API_CALLS, EdgeType::ApiCall),
            (DB_READS, EdgeType::DbRead),
            (DB_WRITES, EdgeType::DbWrite),
        ];
        for (table, edge_type) in markers {
            if any_match(table, self.content) {
                self.graph
                    .add_edge_deferred(Edge::marker(&self.file_id, edge_type));
            }
        }
    }

    fn router(&mut self) {
        if !any_match(&[&RE_ROUTER_INIT], self.content) {
            return;
        }
        let stem = Path::new(&self.file.rel_path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let node = Node::new(
            format!("router:{}", self.file.rel_path),
            format!("{} (router)", stem),
            NodeType::Router,
        )
        .at(&self.file.rel_path, 0);
        self.add_owned(node, EdgeType::Uses);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(rel_path: &str, content: &str) -> Graph {
        let file = FileDescriptor::new(Path::new("/repo"), &Path::new("/repo").join(rel_path));
        ScriptExtractor::new().extract(&file, content).unwrap()
    }

    fn of_type(graph: &Graph, node_type: NodeType) -> Vec<&Node> {
        graph.nodes().iter().filter(|n| n.node_type == node_type).collect()
    }

    #[test]
    fn test_route_is_one_endpoint() {
        let graph = extract(
            "server.js",
            "const app = express();\n\napp.get('/users', (req, res) => res.json([]));\n",
        );
        let endpoints = of_type(&graph, NodeType::Endpoint);
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].label, "GET /users");
        assert_eq!(endpoints[0].id, "endpoint:server.js:GET:/users");
        assert_eq!(endpoints[0].line_number, 3);
        assert!(graph.edges().iter().any(|e| e.source == "file:server.js"
            && e.target == endpoints[0].id
            && e.edge_type == EdgeType::EndpointHandler));
    }

    #[test]
    fn test_mount_is_middleware() {
        let graph = extract("app.js", "app.use('', cors());\nrouter.use('/api', api);\n");
        let middleware = of_type(&graph, NodeType::Middleware);
        assert_eq!(middleware.len(), 2);
        assert!(middleware.iter().any(|n| n.label == "USE (middleware)"));
        assert!(middleware.iter().any(|n| n.label == "USE /api"));
    }

    #[test]
    fn test_class_roles_and_inheritance() {
        let graph = extract(
            "src/ui.jsx",
            "export default class UserView extends React.Component {}\n\
             class BillingService {}\n\
             class AuthController extends Base {}\n",
        );
        assert_eq!(graph.node("class:src/ui.jsx:UserView").unwrap().node_type, NodeType::Component);
        assert_eq!(
            graph.node("class:src/ui.jsx:BillingService").unwrap().node_type,
            NodeType::Service
        );
        let controller = graph.node("class:src/ui.jsx:AuthController").unwrap();
        assert_eq!(controller.node_type, NodeType::Router);
        assert_eq!(controller.metadata["extends"], "Base");
        assert!(graph.contains_node("class_ref:Base"));
    }

    #[test]
    fn test_functions_skip_seen_names() {
        let graph = extract(
            "src/App.tsx",
            "export function App() {}\n\
             const authMiddleware = (req, res, next) => next();\n\
             export const userHandler = async (req) => {};\n\
             const helper = x => x;\n\
             function App() {}\n",
        );
        assert_eq!(graph.node("func:src/App.tsx:App").unwrap().node_type, NodeType::Component);
        assert_eq!(
            graph.node("func:src/App.tsx:authMiddleware").unwrap().node_type,
            NodeType::Middleware
        );
        assert_eq!(
            graph.node("func:src/App.tsx:userHandler").unwrap().node_type,
            NodeType::Endpoint
        );
        assert_eq!(graph.node("func:src/App.tsx:helper").unwrap().node_type, NodeType::Function);
        let uses_app = graph
            .edges()
            .iter()
            .filter(|e| e.target == "func:src/App.tsx:App")
            .count();
        assert_eq!(uses_app, 1);
    }

    #[test]
    fn test_capitalized_function_outside_jsx_is_function() {
        let graph = extract("lib/make.js", "function Build() {}\n");
        assert_eq!(graph.node("func:lib/make.js:Build").unwrap().node_type, NodeType::Function);
    }

    #[test]
    fn test_models_imports_and_markers() {
        let graph = extract(
            "models/user.js",
            "const mongoose = require('mongoose');\n\
             import { x } from './x';\n\
             const User = mongoose.model('User', schema);\n\
             User.findOne({});\n\
             await fetch('/api');\n",
        );
        assert_eq!(graph.node("model:models/user.js:User").unwrap().node_type, NodeType::Model);

        let mut imports: Vec<&str> = graph
            .edges()
            .iter()
            .filter(|e| e.edge_type == EdgeType::Imports)
            .map(|e| e.target.as_str())
            .collect();
        imports.sort();
        assert_eq!(imports, vec!["module:./x", "module:mongoose"]);

        let markers: Vec<EdgeType> = graph
            .edges()
            .iter()
            .filter(|e| e.source == e.target)
            .map(|e| e.edge_type)
            .collect();
        assert_eq!(markers, vec![EdgeType::ApiCall, EdgeType::DbRead]);
    }

    #[test]
    fn test_router_detection() {
        let graph = extract("routes/users.js", "const router = express.Router();\n");
        let router = graph.node("router:routes/users.js").unwrap();
        assert_eq!(router.label, "users (router)");
        assert_eq!(router.node_type, NodeType::Router);
    }
}
