//! Error types for analysis runs and per-file extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole analysis run.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The requested root does not exist or is not a directory.
    #[error("Not a valid directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// IO error while preparing the run (e.g. canonicalizing the root).
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The caller cancelled the run between two files.
    #[error("Analysis cancelled")]
    Cancelled,

    /// The extraction worker pool could not be built.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl AnalyzeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzeError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while extracting a single file.
///
/// These never abort a run: the orchestrator logs them and keeps going.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid source for its language.
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// The parser grammar could not be loaded.
    #[error("Grammar error: {0}")]
    Grammar(String),
}

impl ExtractError {
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        ExtractError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
