//! Cart route handlers.
//!
//! An authenticated session writes through to the remote customer state; a
//! guest session mutates the session-stored cart. Both paths return the
//! resulting cart so the client can adopt it on success.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use fernway_core::ProductId;
use fernway_core::cart::Cart;

use crate::error::Result;
use crate::routes::session_state;
use crate::services::sync::SyncService;
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_quantity: u32,
}

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
            total_quantity: cart.total_quantity(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// The current cart for this session.
async fn load_cart(state: &AppState, session: &Session) -> Result<Cart> {
    match session_state::current_user(session).await {
        Some(user) => {
            use crate::services::sync::CustomerStateStore;
            Ok(state.customer_state().load(user.id).await?.cart)
        }
        None => Ok(session_state::guest_cart(session).await),
    }
}

/// Show the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&state, &session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add an item to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = form.quantity.unwrap_or(1);

    let cart = match session_state::current_user(&session).await {
        Some(user) => {
            SyncService::new(state.customer_state())
                .add_to_cart(user.id, form.product_id, quantity)
                .await?
        }
        None => {
            let mut cart = session_state::guest_cart(&session).await;
            cart.add(form.product_id, quantity);
            session_state::save_guest_cart(&session, &cart).await?;
            cart
        }
    };

    Ok(Json(CartView::from(&cart)))
}

/// Set a cart line's quantity. Zero removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
    Json(form): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>> {
    let cart = match session_state::current_user(&session).await {
        Some(user) => {
            SyncService::new(state.customer_state())
                .set_cart_quantity(user.id, product_id, form.quantity)
                .await?
        }
        None => {
            let mut cart = session_state::guest_cart(&session).await;
            cart.set_quantity(product_id, form.quantity);
            session_state::save_guest_cart(&session, &cart).await?;
            cart
        }
    };

    Ok(Json(CartView::from(&cart)))
}

/// Remove a cart line.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<ProductId>,
) -> Result<Json<CartView>> {
    let cart = match session_state::current_user(&session).await {
        Some(user) => {
            SyncService::new(state.customer_state())
                .remove_from_cart(user.id, product_id)
                .await?
        }
        None => {
            let mut cart = session_state::guest_cart(&session).await;
            cart.remove(product_id);
            session_state::save_guest_cart(&session, &cart).await?;
            cart
        }
    };

    Ok(Json(CartView::from(&cart)))
}

/// The cart count badge.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<Json<CartCount>> {
    let cart = load_cart(&state, &session).await?;
    Ok(Json(CartCount {
        count: cart.total_quantity(),
    }))
}
