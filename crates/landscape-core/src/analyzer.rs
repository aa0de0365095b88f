//! Analysis orchestrator.
//!
//! One run is a bounded batch job:
//!
//! 1. discover files (single-threaded walk)
//! 2. extract every file into its own fragment (parallel, order-preserving)
//! 3. merge fragments in discovery order
//! 4. run each family's import resolver over the merged graph
//! 5. drop dangling and duplicate edges, then serialize
//!
//! Nothing is retained between runs.

use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::discovery::{collect_files, FileDescriptor};
use crate::error::{AnalyzeError, ExtractError};
use crate::extract::{file_node, read_source, ExtractorRegistry, LanguageFamily};
use crate::graph::{Graph, GraphData};
use crate::resolve::{self, ImportResolver, PythonResolver, ScriptResolver};

/// Builds the structural graph of a repository.
pub struct Analyzer {
    config: Config,
    registry: ExtractorRegistry,
    cancel: Option<Arc<AtomicBool>>,
}

impl Analyzer {
    pub fn new(config: Config) -> Self {
        let registry = ExtractorRegistry::new(&config.extraction);
        Self {
            config,
            registry,
            cancel: None,
        }
    }

    /// Stop the run between two files once `flag` is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Analyze the repository rooted at `root`.
    pub fn analyze(&self, root: &Path) -> Result<GraphData, AnalyzeError> {
        let started = Instant::now();

        let files = collect_files(root, &self.config.discovery)?;
        info!(root = %root.display(), files = files.len(), "discovered files");

        let mut graph = self.build_graph(&files)?;
        self.resolve_imports(&files, &mut graph);

        let dropped = graph.resolve_edges();
        info!(dropped, "dropped dangling and duplicate edges");

        let mut data = graph.serialize();
        data.repo_name = repo_name(root);

        info!(
            nodes = data.stats.total_nodes,
            edges = data.stats.total_edges,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );
        Ok(data)
    }

    /// Extract and merge every file, without resolving imports.
    pub fn build_graph(&self, files: &[FileDescriptor]) -> Result<Graph, AnalyzeError> {
        let fragments = match self.config.extraction.threads {
            0 => self.extract_all(files)?,
            threads => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| AnalyzeError::ThreadPool(e.to_string()))?;
                pool.install(|| self.extract_all(files))?
            }
        };

        let merged = fragments.len();
        let mut graph = Graph::new();
        for fragment in fragments {
            graph.merge(fragment);
        }
        info!(
            fragments = merged,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "merged fragments"
        );
        Ok(graph)
    }

    fn extract_all(&self, files: &[FileDescriptor]) -> Result<Vec<Graph>, AnalyzeError> {
        files
            .par_iter()
            .map(|file| {
                if self.is_cancelled() {
                    return Err(AnalyzeError::Cancelled);
                }
                Ok(self.extract_file(file))
            })
            .collect()
    }

    /// Extract one file. Failures degrade to a fragment holding only the file node.
    pub fn extract_file(&self, file: &FileDescriptor) -> Graph {
        let extractor = self.registry.extractor_for(&file.extension);

        let extracted = read_source(file, extractor.read_limit())
            .and_then(|content| extractor.extract(file, &content));

        match extracted {
            Ok(fragment) => fragment,
            Err(err) => {
                match &err {
                    ExtractError::Parse { .. } => debug!(file = %file.rel_path, "{}", err),
                    _ => warn!(file = %file.rel_path, "{}", err),
                }
                let mut fragment = Graph::new();
                fragment.add_node(file_node(file));
                fragment
            }
        }
    }

    /// Rewrite import placeholders, one resolver per language family.
    fn resolve_imports(&self, files: &[FileDescriptor], graph: &mut Graph) {
        let python = PythonResolver::new(self.files_of(files, LanguageFamily::Python));
        let script = ScriptResolver::new(self.files_of(files, LanguageFamily::Script));
        let resolvers: [&dyn ImportResolver; 2] = [&python, &script];

        for resolver in resolvers {
            let rewritten = resolve::apply(resolver, graph);
            info!(family = resolver.family().name(), rewritten, "resolved imports");
        }
    }

    fn files_of<'f>(
        &'f self,
        files: &'f [FileDescriptor],
        family: LanguageFamily,
    ) -> impl Iterator<Item = &'f FileDescriptor> + 'f {
        files
            .iter()
            .filter(move |file| self.registry.family_of(&file.extension) == family)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Analyze `root` with the given configuration.
pub fn analyze_repository(root: &Path, config: Config) -> Result<GraphData, AnalyzeError> {
    Analyzer::new(config).analyze(root)
}

fn repo_name(root: &Path) -> Option<String> {
    root.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(root)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
}
