//! Persistence layer for message events.
//!
//! [`EventStore`] defines the interface for recording message exchanges;
//! the default implementation is [`any::AnyStore`], which runs against
//! Postgres in deployment and SQLite in tests through sqlx's `Any` driver.
//!
//! Trait methods use `impl Future` in their signatures, so no extra
//! `async-trait` crate is required.

pub mod any;

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a recorded message exchange. Persisted as exactly
/// `"sent"` or `"received"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single row in the `message_events` table.
///
/// Rows are written once per handled request and never updated or deleted
/// by the application.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// UUID string, assigned by the handler at construction.
    pub id: String,
    pub direction: Direction,
    /// Counterparty URL: sender for inbound rows, target for outbound.
    pub peer_url: Option<String>,
    pub payload: Option<String>,
    /// Local wall-clock observation, UTC.
    pub local_time_utc: DateTime<Utc>,
    /// Reference timestamp; `None` when the reference service was
    /// unreachable.
    pub ntp_time_utc: Option<DateTime<Utc>>,
    /// Origin timestamps as reported by the sender, stored as received.
    pub origin_local_time: Option<String>,
    pub origin_ntp_time: Option<String>,
    /// Round-trip bounds for outbound rows.
    pub send_time: Option<DateTime<Utc>>,
    pub receive_time: Option<DateTime<Utc>>,
    pub rtt_ms: Option<i64>,
    /// Local minus reference, milliseconds.
    pub offset_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Interface for persisting message events.
pub trait EventStore: Send + Sync + 'static {
    /// Persist one event row inside its own short-lived transaction.
    fn insert_event(
        &self,
        event: MessageEvent,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Newest-first slice of the event log.
    fn recent_events(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<MessageEvent>, sqlx::Error>> + Send;
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn direction_wire_form_is_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Sent).unwrap(), "\"sent\"");
        assert_eq!(serde_json::to_string(&Direction::Received).unwrap(), "\"received\"");
    }

    #[test]
    fn direction_as_str_matches_display() {
        assert_eq!(Direction::Sent.as_str(), Direction::Sent.to_string());
        assert_eq!(Direction::Received.as_str(), Direction::Received.to_string());
    }
}
