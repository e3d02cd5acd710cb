//! Common test utilities for subsvc integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use subsvc_service::{create_router, AppState, ServiceConfig, StorageBackend};
use subsvc_store::{MemoryStore, Store};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: Option<TempDir>,
}

impl TestHarness {
    /// Create a new test harness over an empty in-memory store.
    pub fn new() -> Self {
        Self::build(Arc::new(MemoryStore::new()), StorageBackend::Memory, None)
    }

    /// Create a new test harness with a fresh `RocksDB` database.
    #[cfg(feature = "rocksdb-backend")]
    pub fn with_rocksdb() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = subsvc_store::RocksStore::open(temp_dir.path()).expect("Failed to open store");
        Self::build(Arc::new(store), StorageBackend::RocksDb, Some(temp_dir))
    }

    fn build(store: Arc<dyn Store>, backend: StorageBackend, temp_dir: Option<TempDir>) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir
                .as_ref()
                .map(|d| d.path().to_string_lossy().to_string())
                .unwrap_or_default(),
            storage_backend: backend,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            max_concurrent_requests: 50,
        };

        let state = AppState::new(store, config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            _temp_dir: temp_dir,
        }
    }

    /// Create a user and return its id.
    pub async fn create_user(&self, email: &str) -> u64 {
        let response = self
            .server
            .post("/users")
            .json(&json!({ "email": email }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["id"].as_u64().expect("user id")
    }

    /// Create a subscription and return the response body.
    pub async fn create_subscription(&self, user_id: u64, plan: &str) -> Value {
        let response = self
            .server
            .post("/subscriptions")
            .json(&json!({ "user_id": user_id, "plan": plan }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// List a user's subscriptions.
    pub async fn list_subscriptions(&self, user_id: u64) -> Vec<Value> {
        let response = self
            .server
            .get(&format!("/users/{user_id}/subscriptions"))
            .await;
        response.assert_status_ok();
        response.json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
