use std::fs;
use std::path::Path;

use landscape_core::discovery::collect_files;
use landscape_core::{AnalyzeError, DiscoveryConfig};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn rel_paths(root: &Path, config: &DiscoveryConfig) -> Vec<String> {
    collect_files(root, config)
        .unwrap()
        .into_iter()
        .map(|f| f.rel_path)
        .collect()
}

#[test]
fn test_denylisted_and_hidden_dirs_are_pruned() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "node_modules/lib/index.js", "module.exports = 1;");
    write(dir.path(), ".github/workflows/ci.yml", "on: push");
    write(dir.path(), "pkg.egg-info/PKG-INFO", "Name: pkg");
    write(dir.path(), "src/app.py", "x = 1");

    assert_eq!(rel_paths(dir.path(), &DiscoveryConfig::default()), vec!["src/app.py"]);
}

#[test]
fn test_only_denylisted_dir_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "node_modules/react/index.js", "export default {};");

    assert!(rel_paths(dir.path(), &DiscoveryConfig::default()).is_empty());
}

#[test]
fn test_binary_extensions_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "logo.PNG", "not really a png");
    write(dir.path(), "Cargo.lock", "# lock");
    write(dir.path(), "main.go", "package main");

    assert_eq!(rel_paths(dir.path(), &DiscoveryConfig::default()), vec!["main.go"]);
}

#[test]
fn test_gitignore_rules() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".gitignore", "generated/\n*.log\n!keep.log\n");
    write(dir.path(), "generated/out.js", "x");
    write(dir.path(), "debug.log", "x");
    write(dir.path(), "keep.log", "x");
    write(dir.path(), "src/main.rs", "fn main() {}");

    let files = rel_paths(dir.path(), &DiscoveryConfig::default());
    assert_eq!(files, vec![".gitignore", "keep.log", "src/main.rs"]);
}

#[test]
fn test_gitignore_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".gitignore", "*.log\n");
    write(dir.path(), "debug.log", "x");

    let config = DiscoveryConfig {
        respect_gitignore: false,
        ..DiscoveryConfig::default()
    };
    assert_eq!(rel_paths(dir.path(), &config), vec![".gitignore", "debug.log"]);
}

#[test]
fn test_discovery_order_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b/z.py", "a/y.py", "c.py", "a/x.py"] {
        write(dir.path(), name, "");
    }

    let first = rel_paths(dir.path(), &DiscoveryConfig::default());
    let second = rel_paths(dir.path(), &DiscoveryConfig::default());
    assert_eq!(first, second);
    assert_eq!(first, vec!["a/x.py", "a/y.py", "b/z.py", "c.py"]);
}

#[test]
fn test_file_root_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.py", "");

    let err = collect_files(&dir.path().join("a.py"), &DiscoveryConfig::default()).unwrap_err();
    assert!(matches!(err, AnalyzeError::NotADirectory(_)));
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_discovered_but_linked_dir_is_not_entered() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "shared/real.py", "x = 1");
    symlink(dir.path().join("shared/real.py"), dir.path().join("link.py")).unwrap();
    symlink(dir.path().join("shared"), dir.path().join("alias")).unwrap();

    assert_eq!(
        rel_paths(dir.path(), &DiscoveryConfig::default()),
        vec!["link.py", "shared/real.py"]
    );
}
