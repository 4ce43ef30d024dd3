//! Helpers for integration tests that talk to a live MongoDB server.
//!
//! Live tests run only when `USER_SERVICE_TEST_MONGODB_HOST` names a server.
//! When the variable is set but the server cannot be reached, the
//! `SKIP_TEST_CLUSTER` policy decides whether the suite skips or fails, so CI
//! breakage is not masked by default.

use std::time::Duration;

use mongodb::Database;
use mongodb::bson::Document;
use user_service::outbound::persistence::{ConnectionConfig, connect};

const HOST_VAR: &str = "USER_SERVICE_TEST_MONGODB_HOST";
const PORT_VAR: &str = "USER_SERVICE_TEST_MONGODB_PORT";
const DEFAULT_PORT: u16 = 27017;
const DATABASE: &str = "user_service_test";

/// Returns true when the `SKIP_TEST_CLUSTER` environment variable is set to a
/// truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles server setup failures consistently across integration tests.
///
/// When `SKIP_TEST_CLUSTER` is truthy, prints a skip marker and returns `None`.
/// Otherwise, panics with a clear failure message.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("MongoDB test server setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Connection parameters for the configured test server, if any.
pub fn live_connection_config() -> Option<ConnectionConfig> {
    let host = std::env::var(HOST_VAR).ok().filter(|host| !host.trim().is_empty())?;
    let port = std::env::var(PORT_VAR)
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    Some(
        ConnectionConfig::new(host, port, DATABASE)
            .with_app_name("user-service-tests")
            .with_connect_timeout(Duration::from_secs(3))
            .with_server_selection_timeout(Duration::from_secs(3)),
    )
}

/// Connect to the configured test server.
///
/// Returns `None` when no server is configured, or when it is unreachable and
/// `SKIP_TEST_CLUSTER` is set.
pub async fn live_database() -> Option<Database> {
    let Some(config) = live_connection_config() else {
        eprintln!("SKIP-LIVE-MONGODB: {HOST_VAR} is not set");
        return None;
    };
    match connect(&config).await {
        Ok(database) => Some(database),
        Err(error) => handle_cluster_setup_failure(error),
    }
}

/// Collection name unique to one test run.
pub fn unique_collection_name() -> String {
    format!("users_{}", uuid::Uuid::new_v4().simple())
}

/// Drop a collection created by a test; failures are reported, not raised.
pub async fn drop_collection(database: &Database, name: &str) {
    if let Err(error) = database.collection::<Document>(name).drop().await {
        eprintln!("failed to drop test collection {name}: {error}");
    }
}
