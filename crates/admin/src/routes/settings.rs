//! General shop settings route handlers.
//!
//! Key/value JSON documents, merge-upserted per key. The popup config has
//! its own routes; everything else (shipping notice, holiday banner, store
//! hours) goes through here.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value as JsonValue;
use tracing::instrument;

use crate::db::settings;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List all settings.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<JsonValue>> {
    let entries = settings::list_settings(state.pool()).await?;
    Ok(Json(JsonValue::Object(entries.into_iter().collect())))
}

/// Get one setting.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<JsonValue>> {
    settings::get_setting(state.pool(), &key)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("setting {key}")))
}

/// Set one setting (merge-upsert: siblings untouched).
#[instrument(skip(state, value))]
pub async fn update(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<JsonValue>,
) -> Result<Json<JsonValue>> {
    settings::set_setting(state.pool(), &key, &value).await?;
    Ok(Json(value))
}

/// Delete one setting.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    settings::delete_setting(state.pool(), &key).await?;
    Ok(StatusCode::NO_CONTENT)
}
