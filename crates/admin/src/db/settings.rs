//! Global shop settings storage.
//!
//! One JSONB value per key in `shop.settings`. Writes are per-key
//! merge-upserts: committing one key never touches its siblings, and the
//! row is created if absent. The published popup config lives under the
//! `popup` key; everything else under its own key.

use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Get a global setting value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn get_setting(pool: &PgPool, key: &str) -> Result<Option<JsonValue>, SettingsError> {
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

/// Set a global setting value (merge-upsert: only this key changes).
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn set_setting(pool: &PgPool, key: &str, value: &JsonValue) -> Result<(), SettingsError> {
    sqlx::query(
        r"
        INSERT INTO shop.settings (key, value)
        VALUES ($1, $2)
        ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
        ",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a global setting.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn delete_setting(pool: &PgPool, key: &str) -> Result<(), SettingsError> {
    sqlx::query(
        r"
        DELETE FROM shop.settings
        WHERE key = $1
        ",
    )
    .bind(key)
    .execute(pool)
    .await?;

    Ok(())
}

/// List every setting key and value.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub async fn list_settings(pool: &PgPool) -> Result<Vec<(String, JsonValue)>, SettingsError> {
    let rows = sqlx::query(
        r"
        SELECT key, value FROM shop.settings
        ORDER BY key
        ",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let key: String = row.try_get("key")?;
            let value: JsonValue = row.try_get("value")?;
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()
        .map_err(SettingsError::from)
}
