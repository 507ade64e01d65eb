//! Request / response payloads for the HTTP surface.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body exchanged between peers on `POST /message`.
///
/// Origin timestamps are ISO-8601 strings passed through uninterpreted:
/// they are stored as received, never re-parsed into timestamps. The same
/// type serialises the outbound body built by the send endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagePayload {
    pub from_url: Option<String>,
    pub payload: Option<String>,
    pub origin_local_time: Option<String>,
    pub origin_ntp_time: Option<String>,
}

/// Acknowledgment returned by `POST /message`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageAck {
    /// Local receive time, RFC 3339.
    pub received_at_local: String,
    /// Reference receive time, RFC 3339; `null` when the reference service
    /// was unreachable.
    pub received_at_ntp: Option<String>,
    /// Local minus reference, milliseconds; `null` without a reference time.
    pub offset_ms: Option<i64>,
}

/// Body accepted by `POST /send`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendRequest {
    /// Peer base URL; must be an absolute http(s) URL.
    pub target_url: String,
    pub payload: Option<String>,
}

/// Outcome of a forwarding attempt, returned by `POST /send`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendResponse {
    /// Normalised target (trailing slashes stripped).
    pub target: String,
    pub send_ts: String,
    pub recv_ack_ts: String,
    pub rtt_ms: i64,
    /// The peer's parsed acknowledgment on HTTP 200, otherwise
    /// `{"error": …}` with the response text or transport error.
    pub ack: Value,
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn message_payload_fields_default_to_none() {
        let payload: MessagePayload = serde_json::from_str("{}").unwrap();
        assert!(payload.from_url.is_none());
        assert!(payload.payload.is_none());
        assert!(payload.origin_local_time.is_none());
        assert!(payload.origin_ntp_time.is_none());
    }

    #[test]
    fn outbound_body_serialises_missing_reference_time_as_null() {
        let body = MessagePayload {
            from_url: Some("http://me.example".to_owned()),
            payload: Some("hi".to_owned()),
            origin_local_time: Some("2026-08-06T10:00:00+00:00".to_owned()),
            origin_ntp_time: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        // The key must be present and explicitly null for the receiving peer.
        assert_eq!(value.get("origin_ntp_time"), Some(&Value::Null));
        assert_eq!(value["payload"], "hi");
    }
}
