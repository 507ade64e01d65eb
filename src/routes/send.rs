//! Outbound forwarding endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::db::{Direction, EventStore, MessageEvent};
use crate::error::ServerError;
use crate::ntp::clock_offset_ms;
use crate::schemas::{MessagePayload, SendRequest, SendResponse};
use crate::state::AppState;

/// Wall-clock bound on a single peer delivery attempt.
const PEER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(OpenApi)]
#[openapi(paths(send_message), components(schemas(SendRequest, SendResponse)))]
pub struct SendApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/send", post(send_message))
}

/// Forward a message to a peer's `/message` endpoint and measure the round
/// trip.
///
/// Delivery failures (non-200 status, transport errors, timeout) surface
/// only inside the `ack` field of the response; the endpoint itself fails
/// only on an invalid `target_url`. One `sent` event row is persisted,
/// best-effort.
#[utoipa::path(
    post,
    path = "/send",
    tag = "exchange",
    request_body = SendRequest,
    responses(
        (status = 200, description = "Forwarding attempted", body = SendResponse),
        (status = 400, description = "Invalid target URL")
    )
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendRequest>,
) -> Result<Json<SendResponse>, ServerError> {
    validate_target(&req.target_url)?;
    let target = req.target_url.trim_end_matches('/').to_owned();
    let payload_text = req.payload.unwrap_or_default();

    let origin_local = Utc::now();
    let origin_ntp = match state.ntp.now().await {
        Ok(t) => Some(t),
        Err(e) => {
            debug!(error = %e, "reference time unavailable at send");
            None
        }
    };
    let offset_ms = origin_ntp.map(|t| clock_offset_ms(origin_local, t));

    let body = MessagePayload {
        from_url: Some(state.config.public_url.clone()),
        payload: Some(payload_text.clone()),
        origin_local_time: Some(origin_local.to_rfc3339()),
        origin_ntp_time: origin_ntp.map(|t| t.to_rfc3339()),
    };

    let send_ts = Utc::now();
    let outcome = state
        .http
        .post(format!("{target}/message"))
        .timeout(PEER_TIMEOUT)
        .json(&body)
        .send()
        .await;
    let recv_ts = Utc::now();
    let rtt_ms = (recv_ts - send_ts).num_milliseconds();

    let ack: Value = match outcome {
        Ok(resp) if resp.status() == StatusCode::OK => match resp.json::<Value>().await {
            Ok(parsed) => parsed,
            Err(e) => json!({ "error": e.to_string() }),
        },
        Ok(resp) => {
            let text = resp.text().await.unwrap_or_default();
            json!({ "error": text })
        }
        Err(e) => json!({ "error": e.to_string() }),
    };

    let event = MessageEvent {
        id: Uuid::new_v4().to_string(),
        direction: Direction::Sent,
        peer_url: Some(target.clone()),
        payload: Some(payload_text),
        local_time_utc: Utc::now(),
        ntp_time_utc: origin_ntp,
        origin_local_time: Some(origin_local.to_rfc3339()),
        origin_ntp_time: origin_ntp.map(|t| t.to_rfc3339()),
        send_time: Some(send_ts),
        receive_time: Some(recv_ts),
        rtt_ms: Some(rtt_ms),
        offset_ms,
        created_at: Utc::now(),
    };
    if let Err(e) = state.store.insert_event(event).await {
        warn!(error = %e, "failed to persist sent message event");
    }

    Ok(Json(SendResponse {
        target,
        send_ts: send_ts.to_rfc3339(),
        recv_ack_ts: recv_ts.to_rfc3339(),
        rtt_ms,
        ack,
    }))
}

/// The target must be an absolute http(s) URL with a host.
fn validate_target(raw: &str) -> Result<(), ServerError> {
    let parsed =
        Url::parse(raw).map_err(|e| ServerError::BadRequest(format!("invalid target_url: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ServerError::BadRequest(format!(
                "unsupported target_url scheme: {other}"
            )));
        }
    }
    if parsed.host_str().is_none() {
        return Err(ServerError::BadRequest("target_url has no host".to_owned()));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
