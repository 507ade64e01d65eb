//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::db::any::AnyStore;
use crate::ntp::NtpClient;

/// State shared across all HTTP handlers. Everything here is established
/// once at startup and read-only afterwards.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Persistent message-event store.
    pub store: Arc<AnyStore>,
    /// Outbound HTTP client used for peer forwarding.
    pub http: reqwest::Client,
    /// Reference time client.
    pub ntp: NtpClient,
}
