//! Promotional popup route handlers.
//!
//! The client asks `GET /api/popup` once per page load; the response is the
//! trigger plan (what timers/listeners to arm) plus the offer-step render
//! payload, or 204 when the campaign is disabled or this session has
//! already seen the popup. The lifecycle step lives in the session, so the
//! server enforces the offer -> (spin) -> success order and a spinner prize
//! can only be won once per session.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use fernway_core::Email;
use fernway_core::popup::spinner::{REVEAL_DELAY_SECONDS, SPIN_DURATION_SECONDS};
use fernway_core::popup::{Campaign, PopupStep, RenderedPopup, TriggerPlan, render, spin};

use crate::db::subscribers;
use crate::error::{AppError, Result};
use crate::routes::session_state;
use crate::state::AppState;

/// `GET /api/popup` response: what to arm and what to draw when it fires.
#[derive(Debug, Serialize)]
pub struct PopupLaunch {
    pub plan: TriggerPlan,
    pub popup: RenderedPopup,
}

/// Email capture request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// The granted prize for a spin.
#[derive(Debug, Serialize)]
pub struct PrizeView {
    pub label: String,
    pub code: String,
}

/// `POST /api/popup/spin` response.
///
/// The rotation is derived from the granted segment, so the wheel's
/// resting position always matches the prize in `prize`.
#[derive(Debug, Serialize)]
pub struct SpinResponse {
    pub rotation_degrees: f64,
    pub spin_duration_seconds: f64,
    pub reveal_delay_seconds: f64,
    pub prize: PrizeView,
    /// The success step to show after the reveal delay.
    pub success: RenderedPopup,
}

/// The popup launch payload for this session, or 204.
#[instrument(skip(state, session))]
pub async fn launch(State(state): State<AppState>, session: Session) -> Result<Response> {
    let config = state.popup_config().await;
    if !config.enabled {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let step = session_state::popup_step(&session).await;
    if step.is_seen() {
        // Dismissed or converted this session: no trigger may re-show it
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let plan = TriggerPlan::for_behavior(&config.behavior);
    let popup = render(&config, step.show());

    Ok(Json(PopupLaunch { plan, popup }).into_response())
}

/// A trigger fired client-side; record that the offer is on screen.
#[instrument(skip(session))]
pub async fn shown(session: Session) -> Result<StatusCode> {
    let step = session_state::popup_step(&session).await;
    session_state::set_popup_step(&session, step.show()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The visitor closed the popup. Terminal for the session.
#[instrument(skip(session))]
pub async fn dismiss(session: Session) -> Result<StatusCode> {
    let step = session_state::popup_step(&session).await;
    session_state::set_popup_step(&session, step.dismiss()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Email capture on the offer step.
///
/// Standard and countdown campaigns convert immediately and the response
/// render carries the discount code; spinner campaigns advance to the spin
/// step and the response render carries the wheel.
#[instrument(skip(state, session, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<SubscribeRequest>,
) -> Result<Json<RenderedPopup>> {
    let email = Email::parse(&form.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let config = state.popup_config().await;
    if !config.enabled {
        return Err(AppError::NotFound("no active campaign".to_string()));
    }

    let step = session_state::popup_step(&session).await;
    let next = step
        .submit_email(&config.campaign)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    subscribers::record_subscriber(state.pool(), &email).await?;
    session_state::set_popup_step(&session, next).await?;

    Ok(Json(render(&config, next)))
}

/// Spin the wheel. Picks the winning segment server-side and returns the
/// rotation that lands on it.
#[instrument(skip(state, session))]
pub async fn spin_wheel(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<SpinResponse>> {
    let config = state.popup_config().await;
    let Campaign::Spinner { segments } = &config.campaign else {
        return Err(AppError::BadRequest(
            "the active campaign has no wheel".to_string(),
        ));
    };

    let step = session_state::popup_step(&session).await;
    let next = step
        .finish_spin(&config.campaign)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = spin(&mut rand::rng(), segments.len())
        .ok_or_else(|| AppError::Internal("published spinner campaign has no segments".to_string()))?;
    let segment = segments
        .get(outcome.index)
        .ok_or_else(|| AppError::Internal("spin outcome out of range".to_string()))?;

    session_state::set_popup_step(&session, next).await?;

    tracing::info!(segment = %segment.id, "popup spin granted");

    Ok(Json(SpinResponse {
        rotation_degrees: outcome.rotation_degrees,
        spin_duration_seconds: SPIN_DURATION_SECONDS,
        reveal_delay_seconds: REVEAL_DELAY_SECONDS,
        prize: PrizeView {
            label: segment.label.clone(),
            code: segment.value.clone(),
        },
        success: render(&config, PopupStep::Success),
    }))
}
