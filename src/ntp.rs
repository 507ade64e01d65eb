//! Time-reference client.
//!
//! One bounded SNTP query per invocation, no retry. Every failure mode
//! (timeout, resolution failure, malformed response, timestamp conversion)
//! is converted into an [`NtpError`] value so callers decide whether a
//! missing reference time matters.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rsntp::AsyncSntpClient;
use thiserror::Error;

/// Bound on a single reference query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Failure of a single reference time query.
#[derive(Debug, Error)]
pub enum NtpError {
    #[error("ntp query to {server} timed out after {timeout:?}")]
    Timeout { server: String, timeout: Duration },

    #[error("ntp query failed: {0}")]
    Synchronization(#[from] rsntp::SynchronizationError),

    #[error("ntp timestamp conversion failed: {0}")]
    Conversion(String),
}

/// Client for the configured reference time server.
#[derive(Debug, Clone)]
pub struct NtpClient {
    server: String,
    timeout: Duration,
}

impl NtpClient {
    pub fn new(server: impl Into<String>, timeout: Duration) -> Self {
        Self {
            server: server.into(),
            timeout,
        }
    }

    /// Perform a single SNTP query and return the reference timestamp
    /// derived from the server's transmit time.
    pub async fn now(&self) -> Result<DateTime<Utc>, NtpError> {
        let client = AsyncSntpClient::new();
        let sync = tokio::time::timeout(self.timeout, client.synchronize(self.server.as_str()))
            .await
            .map_err(|_| NtpError::Timeout {
                server: self.server.clone(),
                timeout: self.timeout,
            })??;
        sync.datetime()
            .into_chrono_datetime()
            .map_err(|e| NtpError::Conversion(e.to_string()))
    }
}

/// Offset between a locally observed instant and the reference timestamp,
/// in whole milliseconds. Computed as local minus reference, truncating
/// toward zero.
pub fn clock_offset_ms(local: DateTime<Utc>, reference: DateTime<Utc>) -> i64 {
    (local - reference).num_milliseconds()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration as ChronoDuration;

    #[test]
    fn offset_is_positive_when_local_clock_is_ahead() {
        let reference = Utc::now();
        let local = reference + ChronoDuration::milliseconds(1500);
        assert_eq!(clock_offset_ms(local, reference), 1500);
    }

    #[test]
    fn offset_is_negative_when_local_clock_is_behind() {
        let reference = Utc::now();
        let local = reference - ChronoDuration::milliseconds(250);
        assert_eq!(clock_offset_ms(local, reference), -250);
    }

    #[test]
    fn sub_millisecond_offsets_truncate_toward_zero() {
        let reference = Utc::now();
        assert_eq!(clock_offset_ms(reference + ChronoDuration::microseconds(400), reference), 0);
        assert_eq!(clock_offset_ms(reference - ChronoDuration::microseconds(400), reference), 0);
    }

    #[tokio::test]
    async fn unreachable_server_yields_error_value() {
        let client = NtpClient::new("127.0.0.1:9", Duration::from_millis(50));
        assert!(client.now().await.is_err());
    }
}
