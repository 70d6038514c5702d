//! Visitor preference route handlers.
//!
//! Search history and theme are session-scoped conveniences: they stay in
//! the session record and are never reconciled into customer state (only
//! the cart and wishlist merge at login).

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::session_keys as keys;

/// Most recent search terms kept per session.
const SEARCH_HISTORY_LIMIT: usize = 10;

/// Theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

/// All session preferences.
#[derive(Debug, Serialize)]
pub struct PrefsView {
    pub theme: Theme,
    pub search_history: Vec<String>,
}

/// Theme update request body.
#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: Theme,
}

/// Search history append request body.
#[derive(Debug, Deserialize)]
pub struct SearchTermRequest {
    pub term: String,
}

async fn search_history(session: &Session) -> Vec<String> {
    session
        .get::<Vec<String>>(keys::SEARCH_HISTORY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

async fn theme(session: &Session) -> Theme {
    session
        .get::<Theme>(keys::THEME)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Current preferences.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<PrefsView>> {
    Ok(Json(PrefsView {
        theme: theme(&session).await,
        search_history: search_history(&session).await,
    }))
}

/// Set the theme preference.
#[instrument(skip(session))]
pub async fn set_theme(session: Session, Json(form): Json<ThemeRequest>) -> Result<StatusCode> {
    session.insert(keys::THEME, form.theme).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record a search term: most recent first, de-duplicated, capped.
#[instrument(skip(session, form))]
pub async fn record_search(
    session: Session,
    Json(form): Json<SearchTermRequest>,
) -> Result<Json<Vec<String>>> {
    let term = form.term.trim().to_owned();
    let mut history = search_history(&session).await;

    if !term.is_empty() {
        history.retain(|t| *t != term);
        history.insert(0, term);
        history.truncate(SEARCH_HISTORY_LIMIT);
        session.insert(keys::SEARCH_HISTORY, &history).await?;
    }

    Ok(Json(history))
}

/// Clear the search history.
#[instrument(skip(session))]
pub async fn clear_search_history(session: Session) -> Result<StatusCode> {
    session.remove::<Vec<String>>(keys::SEARCH_HISTORY).await?;
    Ok(StatusCode::NO_CONTENT)
}
