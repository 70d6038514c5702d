//! Popup builder route handlers.
//!
//! The builder edits a working copy of the config client-side. The two
//! mutating actions it exposes are exactly publish (commit the working
//! copy) and reset (discard it and re-fetch the last-committed config via
//! `get_config`). Preview renders the *uncommitted* working copy through
//! the same `fernway_core::popup::render` the storefront uses, so what the
//! builder shows is what production will show.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use fernway_core::popup::{PopupConfig, PopupStep, RenderedPopup, render};

use crate::error::Result;
use crate::services::popup::PopupService;
use crate::state::AppState;

/// Preview request: a working config and the lifecycle step to render.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub config: PopupConfig,
    /// Defaults to the offer step.
    pub step: Option<PopupStep>,
}

/// The last-committed popup config (also serves the builder's "Reset").
#[instrument(skip(state))]
pub async fn get_config(State(state): State<AppState>) -> Result<Json<PopupConfig>> {
    let config = PopupService::new(state.pool()).load().await?;
    Ok(Json(config))
}

/// Publish a working copy as the new campaign config.
///
/// Validation failures return 422 and commit nothing.
#[instrument(skip(state, config))]
pub async fn publish(
    State(state): State<AppState>,
    Json(config): Json<PopupConfig>,
) -> Result<Json<PopupConfig>> {
    PopupService::new(state.pool()).publish(&config).await?;
    Ok(Json(config))
}

/// Render a working copy for the live preview.
///
/// Uses the production renderer; the working copy is not validated or
/// persisted, so the builder can preview half-finished campaigns.
#[instrument(skip(form))]
pub async fn preview(Json(form): Json<PreviewRequest>) -> Json<RenderedPopup> {
    let step = form.step.unwrap_or(PopupStep::Offer);
    Json(render(&form.config, step))
}
