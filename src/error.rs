//! Unified server error type.
//!
//! Handlers that can reject input return `Result<T, ServerError>`, which
//! implements [`axum::response::IntoResponse`] so errors are automatically
//! converted to a JSON-body HTTP response.
//!
//! Reference-time, peer-delivery, and persistence failures never take this
//! path: those subsystems are best-effort and are reported inside the
//! response body (or only logged), never as an HTTP-level error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors that abort a request before its handler logic runs.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
