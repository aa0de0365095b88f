//! Dotted-module resolution for Python imports.

use std::collections::{HashMap, HashSet};

use super::ImportResolver;
use crate::discovery::FileDescriptor;
use crate::extract::vocabulary::PYTHON_EXTENSIONS;
use crate::extract::LanguageFamily;

const PACKAGE_INIT: &str = "__init__";

/// Dotted module path of a repository-relative file path.
///
/// `app/models/user.py` is `app.models.user`; `app/models/__init__.py` is
/// `app.models`.
pub fn module_path(rel_path: &str) -> String {
    let mut module = rel_path.replace(['/', '\\'], ".");
    for ext in PYTHON_EXTENSIONS {
        if let Some(stripped) = module.strip_suffix(&format!(".{}", ext)) {
            module = stripped.to_string();
            break;
        }
    }
    match module.strip_suffix(&format!(".{}", PACKAGE_INIT)) {
        Some(package) => package.to_string(),
        None => module,
    }
}

/// Resolves `module:<dotted.path>` against the Python files of a repository.
#[derive(Debug, Default)]
pub struct PythonResolver {
    owned: HashSet<String>,
    /// Full module path to file id.
    modules: HashMap<String, String>,
    /// Every dotted suffix of every module path, first writer wins.
    suffixes: HashMap<String, String>,
}

impl PythonResolver {
    /// Build the module maps from the family's files, in discovery order.
    pub fn new<'f>(files: impl IntoIterator<Item = &'f FileDescriptor>) -> Self {
        let mut resolver = Self::default();

        for file in files {
            let file_id = file.node_id();
            let module = module_path(&file.rel_path);

            let parts: Vec<&str> = module.split('.').collect();
            for start in (0..parts.len()).rev() {
                resolver
                    .suffixes
                    .entry(parts[start..].join("."))
                    .or_insert_with(|| file_id.clone());
            }

            resolver.modules.entry(module).or_insert_with(|| file_id.clone());
            resolver.owned.insert(file_id);
        }

        resolver
    }

    fn lookup(&self, key: &str) -> Option<&String> {
        self.modules.get(key).or_else(|| self.suffixes.get(key))
    }
}

impl ImportResolver for PythonResolver {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Python
    }

    fn owns(&self, source_id: &str) -> bool {
        self.owned.contains(source_id)
    }

    /// Exact module, then suffix, then dotted prefixes from longest to shortest.
    fn resolve(&self, _source_id: &str, module: &str) -> Option<String> {
        if let Some(file_id) = self.lookup(module) {
            return Some(file_id.clone());
        }

        let parts: Vec<&str> = module.split('.').collect();
        (1..parts.len())
            .rev()
            .find_map(|end| self.lookup(&parts[..end].join(".")))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn resolver(paths: &[&str]) -> PythonResolver {
        let root = Path::new("/repo");
        let files: Vec<FileDescriptor> = paths
            .iter()
            .map(|p| FileDescriptor::new(root, &root.join(p)))
            .collect();
        PythonResolver::new(files.iter())
    }

    #[test]
    fn test_module_path() {
        assert_eq!(module_path("app/models/user.py"), "app.models.user");
        assert_eq!(module_path("app/models/__init__.py"), "app.models");
        assert_eq!(module_path("stubs/types.pyi"), "stubs.types");
        assert_eq!(module_path("setup.py"), "setup");
    }

    #[test]
    fn test_exact_match() {
        let r = resolver(&["app/models/user.py", "app/models/__init__.py"]);
        assert_eq!(r.resolve("file:x.py", "app.models.user").as_deref(), Some("file:app/models/user.py"));
        assert_eq!(r.resolve("file:x.py", "app.models").as_deref(), Some("file:app/models/__init__.py"));
    }

    #[test]
    fn test_suffix_match() {
        let r = resolver(&["src/app/models.py"]);
        // `from .models import User` arrives as `models`
        assert_eq!(r.resolve("file:src/app/views.py", "models").as_deref(), Some("file:src/app/models.py"));
        assert_eq!(r.resolve("file:x.py", "app.models").as_deref(), Some("file:src/app/models.py"));
    }

    #[test]
    fn test_first_writer_wins_for_suffixes() {
        let r = resolver(&["a/utils.py", "b/utils.py"]);
        assert_eq!(r.resolve("file:x.py", "utils").as_deref(), Some("file:a/utils.py"));
    }

    #[test]
    fn test_prefix_match() {
        let r = resolver(&["app/models.py"]);
        // `import app.models.User` style references fall back to the module
        assert_eq!(r.resolve("file:x.py", "app.models.User").as_deref(), Some("file:app/models.py"));
    }

    #[test]
    fn test_unknown_module() {
        let r = resolver(&["app/models.py"]);
        assert_eq!(r.resolve("file:x.py", "requests"), None);
        assert_eq!(r.resolve("file:x.py", "django.db.models"), None);
    }
}
