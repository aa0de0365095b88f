pub mod analyzer;
pub mod classify;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod graph;
pub mod resolve;

pub use analyzer::{analyze_repository, Analyzer};
pub use config::{Config, ConfigError, DiscoveryConfig, ExtractionConfig};
pub use error::{AnalyzeError, ExtractError};
pub use graph::{Edge, EdgeType, Graph, GraphData, Node, NodeType};
