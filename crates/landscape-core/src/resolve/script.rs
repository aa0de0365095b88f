//! Relative-path resolution for JavaScript/TypeScript imports.

use std::collections::{HashMap, HashSet};

use super::ImportResolver;
use crate::discovery::FileDescriptor;
use crate::extract::vocabulary::SCRIPT_EXTENSIONS;
use crate::extract::LanguageFamily;

const INDEX_SUFFIX: &str = "/index";

/// Join `specifier` onto `dir` and collapse `.` and `..` segments.
///
/// Purely textual. Returns `None` when `..` climbs above the repository root.
pub fn normalize_join(dir: &str, specifier: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in dir.split('/').chain(specifier.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(segments.join("/"))
}

fn strip_script_extension(rel_path: &str) -> &str {
    SCRIPT_EXTENSIONS
        .iter()
        .find_map(|ext| {
            rel_path
                .strip_suffix(ext)
                .and_then(|rest| rest.strip_suffix('.'))
        })
        .unwrap_or(rel_path)
}

/// Resolves relative specifiers (`./x`, `../lib/y`) against the script files.
#[derive(Debug, Default)]
pub struct ScriptResolver {
    owned: HashSet<String>,
    /// Path with and without extension, and directory of an index file, to file id.
    paths: HashMap<String, String>,
}

impl ScriptResolver {
    pub fn new<'f>(files: impl IntoIterator<Item = &'f FileDescriptor>) -> Self {
        let mut resolver = Self::default();

        for file in files {
            let file_id = file.node_id();
            let stem = strip_script_extension(&file.rel_path);

            let mut keys = vec![file.rel_path.clone(), stem.to_string()];
            if let Some(dir) = stem.strip_suffix(INDEX_SUFFIX) {
                keys.push(dir.to_string());
            }
            for key in keys {
                resolver.paths.insert(key, file_id.clone());
            }
            resolver.owned.insert(file_id);
        }

        resolver
    }
}

impl ImportResolver for ScriptResolver {
    fn family(&self) -> LanguageFamily {
        LanguageFamily::Script
    }

    fn owns(&self, source_id: &str) -> bool {
        self.owned.contains(source_id)
    }

    /// Only relative specifiers resolve; bare package names never do.
    fn resolve(&self, source_id: &str, module: &str) -> Option<String> {
        if !module.starts_with('.') {
            return None;
        }

        let source = source_id.strip_prefix("file:").unwrap_or(source_id);
        let dir = source.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
        let joined = normalize_join(dir, module)?;

        std::iter::once(joined.clone())
            .chain(SCRIPT_EXTENSIONS.iter().map(|ext| format!("{}.{}", joined, ext)))
            .find_map(|candidate| self.paths.get(&candidate))
            .cloned()
    }
}
