//! Integration tests for Fernway Goods.
//!
//! These tests drive the real HTTP surface of both binaries and therefore
//! need live servers:
//!
//! ```bash
//! # With PostgreSQL running and DATABASE_URL set:
//! cargo run -p fernway-cli -- migrate all
//!
//! # Terminal 1 and 2
//! cargo run -p fernway-storefront
//! cargo run -p fernway-admin
//!
//! # Then
//! cargo test -p fernway-integration-tests
//! ```
//!
//! When no server is reachable the tests skip themselves rather than fail,
//! so a plain `cargo test` in a checkout without infrastructure stays
//! green.

use reqwest::Client;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// A cookie-holding client plus the resolved base URLs.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
    pub admin_url: String,
}

impl TestContext {
    /// Connect to both services, or `None` when either is unreachable
    /// (callers skip the test in that case).
    pub async fn connect() -> Option<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        let storefront_url = storefront_base_url();
        let admin_url = admin_base_url();

        for url in [&storefront_url, &admin_url] {
            let healthy = client
                .get(format!("{url}/health"))
                .send()
                .await
                .is_ok_and(|resp| resp.status().is_success());
            if !healthy {
                return None;
            }
        }

        Some(Self {
            client,
            storefront_url,
            admin_url,
        })
    }

    /// A unique throwaway account email.
    #[must_use]
    pub fn fresh_email() -> String {
        format!("test-{}@fernwaygoods.test", uuid::Uuid::new_v4())
    }
}
