//! Authentication route handlers.
//!
//! Login and registration both end with the guest-state merge: whatever the
//! visitor accumulated anonymously is reconciled into their customer state,
//! written back remotely, and only then cleared from the session. The
//! response carries the merged cart and wishlist so the client adopts the
//! post-merge state without a second round trip.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::session::CurrentUser;
use crate::models::user::User;
use crate::routes::cart::CartView;
use crate::routes::session_state;
use crate::routes::wishlist::WishlistView;
use crate::services::auth::AuthService;
use crate::services::sync::SyncService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for register/login: the account plus the post-merge state.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub cart: CartView,
    pub wishlist: WishlistView,
}

/// Sign in the session and reconcile guest state.
///
/// The guest session entries are cleared only after the merged state has
/// been written remotely; a failed write-back aborts the login response
/// and leaves the guest state untouched.
async fn establish_session(
    state: &AppState,
    session: &Session,
    user: User,
) -> Result<AuthResponse> {
    // Rotate the session ID across the privilege change
    session.cycle_id().await?;

    let guest_cart = session_state::guest_cart(session).await;
    let guest_wishlist = session_state::guest_wishlist(session).await;

    let merged = SyncService::new(state.customer_state())
        .merge_on_login(user.id, &guest_cart, &guest_wishlist)
        .await?;

    session_state::clear_guest_state(session).await?;
    session_state::set_current_user(
        session,
        &CurrentUser {
            id: user.id,
            email: user.email.clone(),
        },
    )
    .await?;

    Ok(AuthResponse {
        cart: CartView::from(&merged.cart),
        wishlist: WishlistView::from(&merged.wishlist),
        user,
    })
}

/// Register a new account.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&form.email, &form.password)
        .await?;

    let response = establish_session(&state, &session, user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Log in to an existing account.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let user = AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await?;

    let response = establish_session(&state, &session, user).await?;
    Ok(Json(response))
}

/// Log out: the whole session is flushed, so the next request starts a
/// fresh anonymous session with empty guest state.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    session.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The currently logged-in user.
#[instrument(skip(session))]
pub async fn me(session: Session) -> Result<Json<CurrentUser>> {
    session_state::current_user(&session)
        .await
        .map(Json)
        .ok_or_else(|| AppError::Unauthorized("not logged in".to_string()))
}
