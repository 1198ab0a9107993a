//! API layer
//!
//! HTTP handlers for:
//! - Accounts, statuses and the public timeline (`/v1`)
//! - Metrics (Prometheus)

mod accounts;
mod dto;
pub mod metrics;
mod statuses;
mod timelines;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

pub use dto::*;
pub use metrics::{metrics, track_http_metrics};

use crate::AppState;
use crate::auth::require_auth;

/// Create the v1 API router
///
/// Routes are split into public and authenticated endpoints.
pub fn v1_router(state: AppState) -> Router<AppState> {
    // Public endpoints (no authentication required)
    let public_routes = Router::new()
        .route("/v1/accounts", post(accounts::create_account))
        .route("/v1/accounts/:username", get(accounts::get_account))
        .route("/v1/statuses/:id", get(statuses::get_status))
        .route("/v1/timelines/public", get(timelines::public_timeline));

    // Authenticated endpoints (require `Authentication: username <name>`)
    let authenticated_routes = Router::new()
        .route("/v1/statuses", post(statuses::create_status))
        .route("/v1/statuses/:id", delete(statuses::delete_status))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    public_routes.merge(authenticated_routes)
}
