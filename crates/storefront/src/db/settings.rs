//! Read access to the global shop settings.
//!
//! `shop.settings` is written by the admin binary; the storefront only ever
//! reads it (the published popup config lives under the `popup` key).

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use super::RepositoryError;

/// Get a global setting value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_setting(pool: &PgPool, key: &str) -> Result<Option<JsonValue>, RepositoryError> {
    let result = sqlx::query_scalar(
        r"
        SELECT value FROM shop.settings
        WHERE key = $1
        ",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(result)
}
