//! Common test utilities for E2E tests

#![allow(dead_code)]

use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;
use yatter::{AppState, config};

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server backed by a fresh SQLite file
    pub async fn new() -> Self {
        Self::with_backend(config::StoreBackend::Sqlite).await
    }

    /// Create a new test server backed by the in-memory store
    pub async fn in_memory() -> Self {
        Self::with_backend(config::StoreBackend::Memory).await
    }

    async fn with_backend(backend: config::StoreBackend) -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Create test configuration
        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig {
                backend,
                path: db_path,
                max_connections: 5,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        // Initialize app state
        let state = AppState::new(&config).await.unwrap();

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let app = yatter::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// Register an account through the API and return its JSON
    pub async fn create_account(&self, username: &str) -> Value {
        let response = self
            .client
            .post(self.url("/v1/accounts"))
            .json(&serde_json::json!({
                "username": username,
                "password": "P@ssw0rd",
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200, "registering {username}");
        response.json().await.unwrap()
    }

    /// Post a status as `username` and return its JSON
    pub async fn post_status(&self, username: &str, content: &str) -> Value {
        let response = self
            .client
            .post(self.url("/v1/statuses"))
            .header(AUTH_HEADER, auth_header(username))
            .json(&serde_json::json!({ "status": content }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200, "posting as {username}");
        response.json().await.unwrap()
    }
}

/// Name of the identity header
pub const AUTH_HEADER: &str = yatter::auth::AUTHENTICATION_HEADER;

/// Value of the identity header for `username`
pub fn auth_header(username: &str) -> String {
    format!("username {username}")
}
