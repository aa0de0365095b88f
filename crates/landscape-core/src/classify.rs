//! Path-based role classification for file nodes.

use std::path::Path;

use crate::graph::NodeType;

/// Directory names marking test code.
pub const TEST_DIRS: &[&str] = &["test", "tests", "spec", "specs", "__tests__", "test_", "_test"];

/// Basenames (stem or full name, lowercase) of config files.
pub const CONFIG_NAMES: &[&str] = &[
    "config", "settings", "configuration", ".env", "env",
    "webpack", "babel", "eslint", "prettier", "tsconfig",
    "jest", "karma", "rollup", "vite", "next.config",
    "pyproject", "setup.cfg", "tox", "mypy", "flake8",
    "docker-compose", "dockerfile", "makefile", "cmake",
    "package.json", "cargo.toml", "go.mod", "gemfile",
    "pipfile", "poetry", "requirements",
];

/// Extensions (without leading dot) of config files.
pub const CONFIG_EXTENSIONS: &[&str] = &[
    "json", "yaml", "yml", "toml", "ini", "cfg", "env", "conf", "xml", "properties",
];

/// Ancestor directory names and the role they confer, in priority order.
pub const DIRECTORY_ROLES: &[(NodeType, &[&str])] = &[
    (NodeType::Endpoint, &["routes", "api", "endpoints", "views", "controllers"]),
    (NodeType::Model, &["models", "entities", "schemas"]),
    (NodeType::Service, &["services", "providers", "managers"]),
    (NodeType::Utility, &["utils", "utilities", "helpers", "lib", "common", "shared"]),
    (NodeType::Middleware, &["middleware", "middlewares"]),
];

/// Classify a file by its repository-relative path, name and extension.
///
/// Rules, first match wins: test, config, then ancestor directory roles
/// (endpoint, model, service, utility, middleware), then plain file.
/// Comparisons are case-insensitive.
pub fn classify(rel_path: &str, name: &str, extension: &str) -> NodeType {
    let dirs: Vec<String> = rel_path
        .split('/')
        .rev()
        .skip(1)
        .map(|segment| segment.to_lowercase())
        .collect();
    let name_lower = name.to_lowercase();
    let stem = Path::new(&name_lower)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name_lower.clone());
    let extension = extension.trim_start_matches('.').to_lowercase();

    if dirs.iter().any(|d| TEST_DIRS.contains(&d.as_str()))
        || stem.contains("test")
        || stem.contains("spec")
    {
        return NodeType::Test;
    }

    if CONFIG_NAMES.contains(&stem.as_str())
        || CONFIG_NAMES.contains(&name_lower.as_str())
        || CONFIG_EXTENSIONS.contains(&extension.as_str())
    {
        return NodeType::Config;
    }

    for (role, names) in DIRECTORY_ROLES {
        if dirs.iter().any(|d| names.contains(&d.as_str())) {
            return *role;
        }
    }

    NodeType::File
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_path(rel_path: &str) -> NodeType {
        let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
        let ext = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        classify(rel_path, name, &ext)
    }

    #[test]
    fn test_test_files() {
        assert_eq!(classify_path("tests/helpers.py"), NodeType::Test);
        assert_eq!(classify_path("src/__tests__/App.jsx"), NodeType::Test);
        assert_eq!(classify_path("src/user_test.go"), NodeType::Test);
        assert_eq!(classify_path("src/app.spec.ts"), NodeType::Test);
        assert_eq!(classify_path("Tests/api/routes.py"), NodeType::Test);
    }

    #[test]
    fn test_config_files() {
        assert_eq!(classify_path("package.json"), NodeType::Config);
        assert_eq!(classify_path("Dockerfile"), NodeType::Config);
        assert_eq!(classify_path("app/settings.py"), NodeType::Config);
        assert_eq!(classify_path("deploy/values.yaml"), NodeType::Config);
        assert_eq!(classify_path("next.config.js"), NodeType::Config);
        assert_eq!(classify_path(".env"), NodeType::Config);
    }

    #[test]
    fn test_directory_roles() {
        assert_eq!(classify_path("app/routes/users.js"), NodeType::Endpoint);
        assert_eq!(classify_path("app/Models/user.rb"), NodeType::Model);
        assert_eq!(classify_path("src/services/billing.py"), NodeType::Service);
        assert_eq!(classify_path("src/lib/format.ts"), NodeType::Utility);
        assert_eq!(classify_path("src/middleware/auth.js"), NodeType::Middleware);
    }

    #[test]
    fn test_priority_order() {
        // endpoint directories outrank model directories
        assert_eq!(classify_path("api/models/user.py"), NodeType::Endpoint);
        // config outranks directory roles
        assert_eq!(classify_path("services/config.py"), NodeType::Config);
    }

    #[test]
    fn test_filename_is_not_a_directory_role() {
        assert_eq!(classify_path("models.py"), NodeType::File);
        assert_eq!(classify_path("src/main.rs"), NodeType::File);
    }
}
