use landscape_core::config::{DEFAULT_GENERIC_READ_LIMIT, DEFAULT_THREADS, PROJECT_CONFIG_FILE};
use landscape_core::{Config, DiscoveryConfig};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.extraction.generic_read_limit, DEFAULT_GENERIC_READ_LIMIT);
    assert_eq!(config.extraction.threads, DEFAULT_THREADS);
    assert!(config.discovery.skip_hidden_dirs);
    assert!(config.discovery.respect_gitignore);
}

#[test]
fn test_config_to_toml() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("[discovery]"));
    assert!(toml_str.contains("[extraction]"));
    assert!(toml_str.contains("node_modules"));
}

#[test]
fn test_default_config_string_round_trips() {
    let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
    assert_eq!(config.discovery.skip_dirs, DiscoveryConfig::default().skip_dirs);
    assert_eq!(config.extraction.generic_read_limit, DEFAULT_GENERIC_READ_LIMIT);
}

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    std::fs::write(
        &path,
        r#"
[discovery]
skip_dirs = ["vendor", "*.generated"]
skip_hidden_dirs = false

[extraction]
generic_read_limit = 4096
"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(config.discovery.is_skipped_dir("vendor"));
    assert!(config.discovery.is_skipped_dir("api.generated"));
    assert!(!config.discovery.is_skipped_dir("node_modules"));
    assert!(!config.discovery.is_skipped_dir(".github"));
    assert_eq!(config.extraction.generic_read_limit, 4096);
    assert_eq!(config.extraction.threads, DEFAULT_THREADS);
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(PROJECT_CONFIG_FILE);
    std::fs::write(&path, "[extraction]\nthreads = \"many\"\n").unwrap();

    assert!(Config::from_file(&path).is_err());
}
