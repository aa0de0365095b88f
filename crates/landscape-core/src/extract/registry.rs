//! Extractor registry: maps file extensions to their language family.

use std::collections::HashMap;
use std::sync::Arc;

use super::generic::GenericExtractor;
use super::python::PythonExtractor;
use super::script::ScriptExtractor;
use super::{Extractor, LanguageFamily};
use crate::config::ExtractionConfig;

/// Registry of extractors.
///
/// Maps file extensions to their extractor. Extensions nobody owns go to
/// the generic fallback.
pub struct ExtractorRegistry {
    /// Extension to extractor mapping.
    extractors: HashMap<String, Arc<dyn Extractor>>,
    fallback: Arc<dyn Extractor>,
}

impl ExtractorRegistry {
    /// Create a registry with the built-in extractors.
    pub fn new(config: &ExtractionConfig) -> Self {
        let mut registry = Self {
            extractors: HashMap::new(),
            fallback: Arc::new(GenericExtractor::with_read_limit(config.generic_read_limit)),
        };

        registry.register(Arc::new(PythonExtractor::new()));
        registry.register(Arc::new(ScriptExtractor::new()));

        registry
    }

    /// Register an extractor for its supported extensions.
    pub fn register(&mut self, extractor: Arc<dyn Extractor>) {
        for ext in extractor.supported_extensions() {
            self.extractors.insert(ext.to_lowercase(), Arc::clone(&extractor));
        }
    }

    /// The extractor for an extension, falling back to the generic one.
    pub fn extractor_for(&self, extension: &str) -> Arc<dyn Extractor> {
        self.extractors
            .get(&extension.to_lowercase())
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    /// Family that owns an extension.
    pub fn family_of(&self, extension: &str) -> LanguageFamily {
        self.extractor_for(extension).family()
    }

    /// Check if a dedicated extractor owns the given extension.
    pub fn has_dedicated(&self, extension: &str) -> bool {
        self.extractors.contains_key(&extension.to_lowercase())
    }

    /// List all extensions with a dedicated extractor.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.extractors.keys().map(|s| s.as_str()).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_families() {
        let registry = ExtractorRegistry::default();

        for ext in ["py", "pyi"] {
            assert_eq!(registry.family_of(ext), LanguageFamily::Python);
        }
        for ext in ["js", "jsx", "ts", "tsx", "mjs", "cjs"] {
            assert_eq!(registry.family_of(ext), LanguageFamily::Script);
        }
        for ext in ["go", "rs", "c", ""] {
            assert_eq!(registry.family_of(ext), LanguageFamily::Generic);
        }
    }

    #[test]
    fn test_registry_is_case_insensitive() {
        let registry = ExtractorRegistry::default();
        assert!(registry.has_dedicated("PY"));
        assert_eq!(registry.family_of("TSX"), LanguageFamily::Script);
    }

    #[test]
    fn test_fallback_read_limit_follows_config() {
        let config = ExtractionConfig {
            generic_read_limit: 128,
            threads: 0,
        };
        let registry = ExtractorRegistry::new(&config);
        assert_eq!(registry.extractor_for("c").read_limit(), Some(128));
        assert_eq!(registry.extractor_for("py").read_limit(), None);
    }

    #[test]
    fn test_supported_extensions() {
        let registry = ExtractorRegistry::default();
        assert_eq!(
            registry.supported_extensions(),
            vec!["cjs", "js", "jsx", "mjs", "py", "pyi", "ts", "tsx"]
        );
    }
}
