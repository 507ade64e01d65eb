//! Clock diagnostic endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};
use utoipa::OpenApi;

use crate::ntp::clock_offset_ms;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(ntp_check))]
pub struct NtpApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ntp", get(ntp_check))
}

/// Compare the local clock against the configured reference server.
///
/// On success the body carries the local time, the reference time, their
/// offset in milliseconds (local minus reference), and the server queried.
/// When the reference is unreachable the body carries a single `error`
/// field with the stringified failure. No persistence side effect.
#[utoipa::path(
    get,
    path = "/ntp",
    tag = "ntp",
    responses(
        (status = 200, description = "Clock comparison or reference failure", body = Value)
    )
)]
pub async fn ntp_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let local = Utc::now();
    match state.ntp.now().await {
        Err(e) => Json(json!({ "error": e.to_string() })),
        Ok(reference) => Json(json!({
            "local_time": local.to_rfc3339(),
            "ntp_time": reference.to_rfc3339(),
            "offset_ms": clock_offset_ms(local, reference),
            "ntp_server": state.config.ntp_server,
        })),
    }
}
