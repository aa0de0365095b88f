//! File discovery: walk a repository and yield the files worth extracting.
//!
//! Directories are pruned during the walk (denylist, dot-prefixed names, and
//! the root `.gitignore` when present), binary extensions are skipped, and
//! remaining files are checked against the ignore rules once more.
//!
//! Entries are visited in file-name order, so discovery over an unchanged
//! tree is stable. Node identity is still "first wins", which makes the order
//! observable only for shadowed duplicate ids (e.g. two files naming the same
//! external base class with different metadata).

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{DiscoveryConfig, IGNORE_FILE_NAME};
use crate::error::AnalyzeError;

/// A discovered file, shared read-only by every extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the repository root, `/`-separated.
    pub rel_path: String,
    /// Lowercase extension without the leading dot (empty when absent).
    pub extension: String,
    /// Base file name.
    pub name: String,
}

impl FileDescriptor {
    /// Build a descriptor for `path` located under `root`.
    pub fn new(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);

        Self {
            path: path.to_path_buf(),
            rel_path: to_posix(relative),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    /// Id of this file's node.
    pub fn node_id(&self) -> String {
        crate::graph::file_id(&self.rel_path)
    }
}

fn to_posix(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Ignore-file semantics (glob, negation, directory-only rules).
pub trait IgnoreRules: Send + Sync {
    /// Whether a root-relative path is excluded.
    fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool;
}

impl IgnoreRules for Gitignore {
    fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matched(rel_path, is_dir).is_ignore()
    }
}

/// Load the root-level ignore file, if any.
pub fn load_ignore_rules(root: &Path) -> Option<Gitignore> {
    let ignore_file = root.join(IGNORE_FILE_NAME);
    if !ignore_file.is_file() {
        return None;
    }

    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&ignore_file) {
        warn!("Partially invalid {}: {}", ignore_file.display(), err);
    }
    match builder.build() {
        Ok(gitignore) => Some(gitignore),
        Err(err) => {
            warn!("Ignoring unusable {}: {}", ignore_file.display(), err);
            None
        }
    }
}

/// Walk `root` and collect every file that survives the skip rules.
///
/// Fails with [`AnalyzeError::NotADirectory`] when `root` is missing or not a directory.
pub fn collect_files(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<FileDescriptor>, AnalyzeError> {
    if !root.is_dir() {
        return Err(AnalyzeError::NotADirectory(root.to_path_buf()));
    }
    let root = root
        .canonicalize()
        .map_err(|e| AnalyzeError::io(root, e))?;

    let rules: Option<Arc<dyn IgnoreRules>> = if config.respect_gitignore {
        load_ignore_rules(&root).map(|g| Arc::new(g) as Arc<dyn IgnoreRules>)
    } else {
        None
    };

    collect_with_rules(&root, config, rules)
}

/// Walk `root` with explicit ignore rules.
pub fn collect_with_rules(
    root: &Path,
    config: &DiscoveryConfig,
    rules: Option<Arc<dyn IgnoreRules>>,
) -> Result<Vec<FileDescriptor>, AnalyzeError> {
    if !root.is_dir() {
        return Err(AnalyzeError::NotADirectory(root.to_path_buf()));
    }

    let pruner = DirPruner {
        root: root.to_path_buf(),
        config: config.clone(),
        rules: rules.clone(),
    };

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| pruner.keep(entry))
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        // Linked files count; linked directories are never entered.
        let is_file = match entry.file_type() {
            Some(ft) if ft.is_symlink() => entry.path().is_file(),
            Some(ft) => ft.is_file(),
            None => false,
        };
        if !is_file {
            continue;
        }

        let file = FileDescriptor::new(root, entry.path());
        if config.is_binary_extension(&file.extension) {
            continue;
        }
        if let Some(rules) = &rules {
            if rules.is_ignored(Path::new(&file.rel_path), false) {
                debug!("Ignored by {}: {}", IGNORE_FILE_NAME, file.rel_path);
                continue;
            }
        }

        files.push(file);
    }

    debug!("Discovered {} files under {}", files.len(), root.display());
    Ok(files)
}

/// Directory pruning applied while walking.
struct DirPruner {
    root: PathBuf,
    config: DiscoveryConfig,
    rules: Option<Arc<dyn IgnoreRules>>,
}

impl DirPruner {
    fn keep(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        if self.config.is_skipped_dir(&name) {
            return false;
        }

        match &self.rules {
            Some(rules) => {
                let rel = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
                !rules.is_ignored(rel, true)
            }
            None => true,
        }
    }
}
