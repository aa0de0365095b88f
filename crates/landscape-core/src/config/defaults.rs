//! Default values for Landscape configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Discovery Defaults
// ============================================================================

/// Directories pruned during discovery, matched by exact name.
/// Entries starting with `*` match by suffix (e.g. `*.egg-info`).
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    // Version control
    ".git",
    ".hg",
    ".svn",
    // Python caches and environments
    "__pycache__",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".eggs",
    "*.egg-info",
    ".venv",
    "venv",
    "env",
    ".env",
    // Dependencies
    "node_modules",
    // Build outputs
    "dist",
    "build",
    "coverage",
    ".next",
    ".nuxt",
    // IDE/Editor
    ".idea",
    ".vscode",
    ".cursor",
];

/// File extensions (without leading dot) skipped outright as binary-ish.
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "svg",
    // Fonts
    "woff", "woff2", "ttf", "eot",
    // Archives
    "zip", "tar", "gz", "bz2", "rar", "7z",
    // Compiled
    "exe", "dll", "so", "dylib", "pyc", "pyo", "class",
    // Documents
    "pdf", "doc", "docx", "xls", "xlsx",
    // Media
    "mp3", "mp4", "avi", "mov", "wav",
    // Databases
    "db", "sqlite", "sqlite3",
    // Lock files
    "lock",
];

/// Name of the root-level ignore file honoured by discovery.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

// ============================================================================
// Extraction Defaults
// ============================================================================

/// Bytes of a file scanned by the generic extractor (50 KB).
pub const DEFAULT_GENERIC_READ_LIMIT: usize = 50_000;

/// Worker threads for extraction (0 = available parallelism).
pub const DEFAULT_THREADS: usize = 0;

// ============================================================================
// File Names
// ============================================================================

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "landscape.toml";

/// Directory under the user config dir holding `config.toml`.
pub const USER_CONFIG_DIR: &str = "landscape";
