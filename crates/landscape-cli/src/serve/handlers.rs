//! HTTP route handlers for the analysis server.
//!
//! Handlers are kept thin: validate the request, run the analyzer on the
//! blocking pool, map errors to status codes.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use landscape_core::{analyze_repository, AnalyzeError, GraphData};
use tracing::{error, info};

use super::models::{AnalyzeRequest, ErrorResponse, StatusResponse};
use super::AppState;

// =============================================================================
// Errors
// =============================================================================

/// An error response with a `detail` message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

// =============================================================================
// API Handlers
// =============================================================================

/// POST `/api/analyze` - Analyze a repository on the server's filesystem.
///
/// Request body:
/// ```json
/// { "repo_path": "~/code/project" }
/// ```
///
/// Responds 400 for an empty path or a path that is not a directory,
/// 500 for any other failure.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<GraphData>, ApiError> {
    let repo = request.repo_path.trim();
    if repo.is_empty() {
        return Err(ApiError::bad_request("repo_path is required"));
    }

    let resolved = expand_home(repo);
    if !resolved.is_dir() {
        return Err(ApiError::bad_request(format!("Directory not found: {}", repo)));
    }

    info!(repo = %resolved.display(), "analyze request");
    let config = state.config.clone();
    let result = tokio::task::spawn_blocking(move || analyze_repository(&resolved, config))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    match result {
        Ok(data) => Ok(Json(data)),
        Err(AnalyzeError::NotADirectory(path)) => Err(ApiError::bad_request(format!(
            "Directory not found: {}",
            path.display()
        ))),
        Err(err) => {
            error!(error = %err, "analysis failed");
            Err(ApiError::internal(err.to_string()))
        }
    }
}

/// GET `/api/status` - Liveness probe.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}
