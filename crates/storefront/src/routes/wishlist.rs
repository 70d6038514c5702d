//! Wishlist route handlers.
//!
//! Same dual-path discipline as the cart: authenticated sessions write
//! through to the remote customer state, guest sessions mutate the
//! session-stored wishlist.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use fernway_core::ProductId;
use fernway_core::cart::Wishlist;

use crate::error::Result;
use crate::routes::session_state;
use crate::services::sync::SyncService;
use crate::state::AppState;

/// Wishlist display data.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistView {
    pub product_ids: Vec<ProductId>,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        Self {
            product_ids: wishlist.ids().to_vec(),
        }
    }
}

/// Toggle response: the new wishlist and whether the product is now in it.
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub added: bool,
    #[serde(flatten)]
    pub wishlist: WishlistView,
}

/// Show the wishlist.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<WishlistView>> {
    let wishlist = match session_state::current_user(&session).await {
        Some(user) => {
            use crate::services::sync::CustomerStateStore;
            state.customer_state().load(user.id).await?.wishlist
        }
        None => session_state::guest_wishlist(&session).await,
    };

    Ok(Json(WishlistView::from(&wishlist)))
}

/// Add a product to the wishlist.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<WishlistView>> {
    let wishlist = match session_state::current_user(&session).await {
        Some(user) => {
            SyncService::new(state.customer_state())
                .add_to_wishlist(user.id, product_id)
                .await?
        }
        None => {
            let mut wishlist = session_state::guest_wishlist(&session).await;
            wishlist.insert(product_id);
            session_state::save_guest_wishlist(&session, &wishlist).await?;
            wishlist
        }
    };

    Ok(Json(WishlistView::from(&wishlist)))
}

/// Remove a product from the wishlist.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<WishlistView>> {
    let wishlist = match session_state::current_user(&session).await {
        Some(user) => {
            SyncService::new(state.customer_state())
                .remove_from_wishlist(user.id, product_id)
                .await?
        }
        None => {
            let mut wishlist = session_state::guest_wishlist(&session).await;
            wishlist.remove(product_id);
            session_state::save_guest_wishlist(&session, &wishlist).await?;
            wishlist
        }
    };

    Ok(Json(WishlistView::from(&wishlist)))
}

/// Toggle a product's wishlist membership (the heart icon).
#[instrument(skip(state, session))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<ToggleResponse>> {
    let (wishlist, added) = match session_state::current_user(&session).await {
        Some(user) => {
            SyncService::new(state.customer_state())
                .toggle_wishlist(user.id, product_id)
                .await?
        }
        None => {
            let mut wishlist = session_state::guest_wishlist(&session).await;
            let added = if wishlist.contains(product_id) {
                wishlist.remove(product_id);
                false
            } else {
                wishlist.insert(product_id);
                true
            };
            session_state::save_guest_wishlist(&session, &wishlist).await?;
            (wishlist, added)
        }
    };

    Ok(Json(ToggleResponse {
        added,
        wishlist: WishlistView::from(&wishlist),
    }))
}
