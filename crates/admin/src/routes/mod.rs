//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//! GET  /                       - Dashboard overview
//!
//! # Popup builder
//! GET  /popup/config           - Last-committed campaign config (Reset re-fetches this)
//! PUT  /popup/config           - Publish a working copy
//! POST /popup/preview          - Render an uncommitted working copy
//!
//! # Shop settings
//! GET    /settings             - All settings
//! GET    /settings/{key}       - One setting
//! PUT    /settings/{key}       - Merge-upsert one setting
//! DELETE /settings/{key}       - Delete one setting
//! ```
//!
//! There is no auth layer here: the admin binary binds to the private
//! network only and is never exposed publicly.

pub mod dashboard;
pub mod popup;
pub mod settings;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the popup builder routes router.
pub fn popup_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(popup::get_config).put(popup::publish))
        .route("/preview", post(popup::preview))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::index))
        .route(
            "/{key}",
            put(settings::update)
                .get(settings::show)
                .delete(settings::destroy),
        )
}

/// Create all routes for the admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .nest("/popup", popup_routes())
        .nest("/settings", settings_routes())
}
