//! Yatter - a small microblogging backend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - /v1 accounts, statuses, public timeline                  │
//! │  - Authentication header middleware                         │
//! │  - Health and metrics                                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Registration, posting, ownership checks                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - Repository traits                                        │
//! │  - SQLite (sqlx) or in-memory store                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers
//! - `service`: Business logic layer
//! - `data`: Repositories, timeline query engine, stores
//! - `auth`: Header authentication and password hashing
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod service;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// Cloned for each request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Repositories for the configured store
    pub repos: data::Repositories,
}

impl AppState {
    /// Initialize application state
    ///
    /// Opens the store selected by `database.backend`. SQLite runs pending
    /// migrations on connect.
    ///
    /// # Errors
    /// Returns error if the database cannot be opened or migrated
    pub async fn new(config: &config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        let repos = match config.database.backend {
            config::StoreBackend::Sqlite => {
                let db = data::Database::connect(
                    &config.database.path,
                    config.database.max_connections,
                )
                .await?;
                tracing::info!(path = %config.database.path.display(), "Database connected");
                data::Repositories::sqlite(Arc::new(db))
            }
            config::StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                data::Repositories::in_memory()
            }
        };

        tracing::info!("Application state initialized successfully");

        Ok(Self::with_repositories(repos))
    }

    /// Build state around already constructed repositories
    pub fn with_repositories(repos: data::Repositories) -> Self {
        Self { repos }
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::{Router, middleware, routing::get};
    use tower_http::{cors::CorsLayer, trace::TraceLayer};

    Router::new()
        .route("/health", get(health_check))
        .merge(api::v1_router(state.clone()))
        .route_layer(middleware::from_fn(api::track_http_metrics))
        .route("/metrics", get(api::metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn memory_state() -> AppState {
        AppState::with_repositories(data::Repositories::in_memory())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = build_router(memory_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn posting_requires_authentication_header() {
        let response = build_router(memory_state())
            .oneshot(
                Request::post("/v1/statuses")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"status":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reading_a_status_is_public() {
        let response = build_router(memory_state())
            .oneshot(Request::get("/v1/statuses/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // No auth challenge, just absent
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
