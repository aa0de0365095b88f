//! API request and response models.
//!
//! The success payload of `/api/analyze` is [`landscape_core::GraphData`]
//! itself; only the envelopes around it live here.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Repository root; `~` expands to the home directory.
    pub repo_path: String,
}

/// Response of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
