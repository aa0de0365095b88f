//! Configuration management for Landscape.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `landscape.toml` file
//! 3. User config `~/.config/landscape/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File discovery configuration.
    pub discovery: DiscoveryConfig,

    /// Per-file extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./landscape.toml` (project local)
    /// 2. `~/.config/landscape/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(limit) = std::env::var("LANDSCAPE_READ_LIMIT") {
            self.extraction.generic_read_limit = limit
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("LANDSCAPE_READ_LIMIT={limit}")))?;
        }
        if let Ok(threads) = std::env::var("LANDSCAPE_THREADS") {
            self.extraction.threads = threads
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("LANDSCAPE_THREADS={threads}")))?;
        }
        if let Ok(flag) = std::env::var("LANDSCAPE_RESPECT_GITIGNORE") {
            self.discovery.respect_gitignore = parse_flag(&flag).ok_or_else(|| {
                ConfigError::Invalid(format!("LANDSCAPE_RESPECT_GITIGNORE={flag}"))
            })?;
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// File discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory names pruned during the walk.
    pub skip_dirs: Vec<String>,

    /// Prune every dot-prefixed directory.
    pub skip_hidden_dirs: bool,

    /// Extensions (without leading dot) skipped as binary.
    pub binary_extensions: Vec<String>,

    /// Honour a root-level `.gitignore`.
    pub respect_gitignore: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
            skip_hidden_dirs: true,
            binary_extensions: DEFAULT_BINARY_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            respect_gitignore: true,
        }
    }
}

impl DiscoveryConfig {
    /// Whether a directory with this name is pruned.
    pub fn is_skipped_dir(&self, name: &str) -> bool {
        if self.skip_hidden_dirs && name.starts_with('.') {
            return true;
        }
        self.skip_dirs.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => name.ends_with(suffix),
            None => pattern == name,
        })
    }

    /// Whether a lowercase extension (without leading dot) is binary.
    pub fn is_binary_extension(&self, extension: &str) -> bool {
        self.binary_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}

/// Per-file extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Bytes read by the generic extractor.
    pub generic_read_limit: usize,

    /// Worker threads (0 = available parallelism).
    pub threads: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            generic_read_limit: DEFAULT_GENERIC_READ_LIMIT,
            threads: DEFAULT_THREADS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extraction.generic_read_limit, DEFAULT_GENERIC_READ_LIMIT);
        assert!(config.discovery.respect_gitignore);
        assert!(config.discovery.skip_dirs.iter().any(|d| d == "node_modules"));
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[discovery]"));
        assert!(toml_str.contains("[extraction]"));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[discovery]
skip_dirs = ["vendor"]
respect_gitignore = false

[extraction]
generic_read_limit = 1024
threads = 2
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.discovery.skip_dirs, vec!["vendor".to_string()]);
        assert!(!config.discovery.respect_gitignore);
        assert!(config.discovery.skip_hidden_dirs);
        assert_eq!(config.extraction.generic_read_limit, 1024);
        assert_eq!(config.extraction.threads, 2);
    }

    #[test]
    fn test_skipped_dirs() {
        let config = DiscoveryConfig::default();
        assert!(config.is_skipped_dir("node_modules"));
        assert!(config.is_skipped_dir(".github"));
        assert!(config.is_skipped_dir("landscape.egg-info"));
        assert!(!config.is_skipped_dir("src"));
        assert!(!config.is_skipped_dir("builds"));
    }

    #[test]
    fn test_binary_extension_is_case_insensitive() {
        let config = DiscoveryConfig::default();
        assert!(config.is_binary_extension("png"));
        assert!(config.is_binary_extension("PNG"));
        assert!(!config.is_binary_extension("py"));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
