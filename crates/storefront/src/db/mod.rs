//! Database operations for storefront `PostgreSQL`.
//!
//! # Database: `fernway_storefront`
//!
//! ## Tables
//!
//! - `storefront.users` - Customer accounts (email + password hash)
//! - `storefront.customer_state` - Per-customer cart/wishlist document
//! - `storefront.products` - The handmade catalog
//! - `storefront.popup_subscribers` - Emails captured by the popup
//! - `tower_sessions.session` - Tower-sessions storage
//! - `shop.settings` - Global shop settings (written by the admin binary,
//!   read here; both binaries point at the same database in deployment)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p fernway-cli -- migrate storefront
//! ```

pub mod customer_state;
pub mod products;
pub mod settings;
pub mod subscribers;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The underlying query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A uniqueness constraint was violated (e.g., duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),
    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
