//! Axum router construction.
//!
//! [`build`] assembles the complete application router: the exchange
//! endpoints (`/message`, `/send`), the clock diagnostic (`/ntp`), the
//! heartbeat (`/health`), optional Swagger UI, and the CORS / trace-ID
//! middleware layers.

pub mod doc;
mod health;
mod message;
mod ntp;
mod send;

use std::sync::Arc;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(ntp::router())
        .merge(message::router())
        .merge(send::router());

    // Disable with SYNCLAB_ENABLE_SWAGGER=false where the API surface
    // should not be advertised.
    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app.layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
