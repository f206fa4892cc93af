//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use common::{DatabaseConfig, SecurityConfig};
use domain::User;
use gallery_service_lib::{Database, Services};
use tempfile::TempDir;

pub const PEPPER: &str = "integration-pepper";
pub const HMAC_KEY: &str = "integration-hmac-key";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(PEPPER, HMAC_KEY)
}

/// Fresh migrated in-memory database.
pub async fn database() -> Database {
    Database::connect(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Services over a fresh database and a temporary image directory.
pub async fn services() -> (Services, TempDir) {
    let images = tempfile::tempdir().expect("temp dir");
    let services = Services::from_database(database().await, &security(), images.path());
    (services, images)
}

pub fn new_user(email: &str) -> User {
    User::new("Jon Calhoun", 30, email, "adequate1")
}
