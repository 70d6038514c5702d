//! Dashboard overview.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::services::popup::PopupService;
use crate::state::AppState;

/// Overview data for the admin landing page.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub popup_enabled: bool,
    pub popup_campaign: String,
    /// Captured popup emails; `None` when the storefront tables are not in
    /// this database.
    pub popup_subscribers: Option<i64>,
}

/// The admin landing overview.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<DashboardView>> {
    let config = PopupService::new(state.pool()).load().await?;

    let campaign = match &config.campaign {
        fernway_core::popup::Campaign::Standard => "standard",
        fernway_core::popup::Campaign::Countdown { .. } => "countdown",
        fernway_core::popup::Campaign::Spinner { .. } => "spinner",
    };

    // Best-effort: the subscribers table lives in the storefront schema
    let subscribers: Option<i64> =
        sqlx::query_scalar("SELECT COUNT(*) FROM storefront.popup_subscribers")
            .fetch_one(state.pool())
            .await
            .ok();

    Ok(Json(DashboardView {
        popup_enabled: config.enabled,
        popup_campaign: campaign.to_owned(),
        popup_subscribers: subscribers,
    }))
}
