//! Inbound message endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use tracing::{debug, warn};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::db::{Direction, EventStore, MessageEvent};
use crate::ntp::clock_offset_ms;
use crate::schemas::{MessageAck, MessagePayload};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(receive_message), components(schemas(MessagePayload, MessageAck)))]
pub struct MessageApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/message", post(receive_message))
}

/// Receive a peer message: timestamp it, measure the clock offset, and log
/// one `received` event row.
///
/// Persistence is best-effort. A store failure rolls back and is logged;
/// the request still succeeds so peers are never penalised for local
/// database trouble.
#[utoipa::path(
    post,
    path = "/message",
    tag = "exchange",
    request_body = MessagePayload,
    responses(
        (status = 200, description = "Message recorded", body = MessageAck)
    )
)]
pub async fn receive_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MessagePayload>,
) -> Json<MessageAck> {
    let local_recv = Utc::now();
    let ntp_time = match state.ntp.now().await {
        Ok(t) => Some(t),
        Err(e) => {
            debug!(error = %e, "reference time unavailable for inbound message");
            None
        }
    };
    let offset_ms = ntp_time.map(|t| clock_offset_ms(local_recv, t));

    let event = MessageEvent {
        id: Uuid::new_v4().to_string(),
        direction: Direction::Received,
        // Empty strings from the sender count as absent.
        peer_url: payload.from_url.filter(|s| !s.is_empty()),
        payload: payload.payload,
        local_time_utc: local_recv,
        ntp_time_utc: ntp_time,
        origin_local_time: payload.origin_local_time.filter(|s| !s.is_empty()),
        origin_ntp_time: payload.origin_ntp_time.filter(|s| !s.is_empty()),
        send_time: None,
        receive_time: Some(local_recv),
        rtt_ms: None,
        offset_ms,
        created_at: Utc::now(),
    };
    if let Err(e) = state.store.insert_event(event).await {
        warn!(error = %e, "failed to persist received message event");
    }

    Json(MessageAck {
        received_at_local: local_recv.to_rfc3339(),
        received_at_ntp: ntp_time.map(|t| t.to_rfc3339()),
        offset_ms,
    })
}
