//! Heuristic vocabularies used to classify extracted entities.
//!
//! These are plain data tables. Extending a table changes classification
//! without touching extraction logic.

use crate::graph::NodeType;

// ============================================================================
// Shared
// ============================================================================

/// HTTP verbs, lowercase.
pub const HTTP_METHODS: &[&str] = &["get", "post", "put", "patch", "delete", "head", "options"];

/// Method used when no decorator names a verb.
pub const DEFAULT_HTTP_METHOD: &str = "GET";

/// Extensions owned by the Python extractor.
pub const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Extensions owned by the script extractor.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Script extensions where a capitalized function is a UI component.
pub const COMPONENT_EXTENSIONS: &[&str] = &["jsx", "tsx"];

/// First table entry whose needles occur in the lowercase `name`.
pub fn role_by_substring(name: &str, table: &[(&[&str], NodeType)]) -> Option<NodeType> {
    let lower = name.to_lowercase();
    table
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, role)| *role)
}

// ============================================================================
// Python
// ============================================================================

/// Decorators marking a route handler.
pub const ENDPOINT_DECORATORS: &[&str] = &[
    "route", "get", "post", "put", "patch", "delete", "head", "options",
    "api_view", "action",
    "websocket",
];

/// Class or base names of routers/blueprints.
pub const ROUTER_NAMES: &[&str] = &[
    "APIRouter", "Blueprint", "Router", "Namespace",
    "DefaultRouter", "SimpleRouter",
];

/// ORM/document base classes.
pub const MODEL_BASES: &[&str] = &[
    "Model", "models.Model", "db.Model", "Base",
    "Document", "EmbeddedDocument",
    "ModelBase",
];

/// Decorators marking background jobs.
pub const TASK_DECORATORS: &[&str] = &[
    "task", "shared_task", "periodic_task",
    "job", "background_task",
];

/// Bases that never get an external reference node.
pub const IGNORED_BASES: &[&str] = &["object", "type", "ABC", "Exception"];

/// Class-name substrings and the role they confer when no base decides.
pub const PYTHON_CLASS_ROLES: &[(&[&str], NodeType)] = &[
    (&["service"], NodeType::Service),
    (&["middleware"], NodeType::Middleware),
    (&["util", "helper"], NodeType::Utility),
];

/// `obj.method()` names treated as database reads.
pub const DB_READ_METHODS: &[&str] = &[
    "filter", "get", "all", "first", "last", "count",
    "exists", "aggregate", "values", "values_list",
    "select_related", "prefetch_related", "annotate",
    "order_by", "distinct", "exclude",
    "find", "find_one", "find_many",
    "query", "execute", "fetchone", "fetchall", "fetchmany",
    "select", "where",
];

/// `obj.method()` names treated as database writes.
pub const DB_WRITE_METHODS: &[&str] = &[
    "save", "create", "update", "delete", "bulk_create",
    "bulk_update", "insert", "insert_one", "insert_many",
    "update_one", "update_many", "delete_one", "delete_many",
    "commit", "add", "merge", "flush",
    "put_item", "delete_item",
];

/// HTTP-client method names.
pub const API_CALL_NAMES: &[&str] = &[
    "get", "post", "put", "patch", "delete", "head", "options",
    "request", "fetch", "urlopen",
];

/// Module aliases of HTTP clients.
pub const API_CALL_MODULES: &[&str] = &["requests", "httpx", "aiohttp", "urllib"];

/// Bare functions performing raw HTTP fetches.
pub const API_FETCH_FUNCTIONS: &[&str] = &["fetch", "urlopen"];

// ============================================================================
// Script
// ============================================================================

/// Route verb that mounts middleware instead of an endpoint.
pub const MOUNT_VERB: &str = "use";

/// Class-name substrings and the role they confer, in priority order.
pub const SCRIPT_CLASS_ROLES: &[(&[&str], NodeType)] = &[
    (&["component", "view"], NodeType::Component),
    (&["service"], NodeType::Service),
    (&["middleware"], NodeType::Middleware),
    (&["controller", "router"], NodeType::Router),
    (&["model"], NodeType::Model),
];

/// Function-name substrings and the role they confer, in priority order.
pub const SCRIPT_FUNCTION_ROLES: &[(&[&str], NodeType)] = &[
    (&["middleware"], NodeType::Middleware),
    (&["handler", "controller"], NodeType::Endpoint),
];
