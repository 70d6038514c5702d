//! Session read/write helpers shared by the route handlers.
//!
//! Reads are forgiving: a missing or corrupt session entry comes back as
//! the empty default instead of an error, so a bad cookie or a stale
//! serialization format can never break a page. Writes surface their
//! errors - dropping a cart mutation silently is worse than a 500.

use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use fernway_core::cart::{Cart, Wishlist};
use fernway_core::popup::PopupStep;

use crate::models::session::CurrentUser;
use crate::models::session_keys as keys;

/// The logged-in user, if any.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session.get(keys::CURRENT_USER).await.ok().flatten()
}

/// Store the logged-in user.
pub async fn set_current_user(session: &Session, user: &CurrentUser) -> Result<(), SessionError> {
    session.insert(keys::CURRENT_USER, user).await
}

/// The guest cart, defaulting to empty when absent or unparsable.
pub async fn guest_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(keys::GUEST_CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the guest cart.
pub async fn save_guest_cart(session: &Session, cart: &Cart) -> Result<(), SessionError> {
    session.insert(keys::GUEST_CART, cart).await
}

/// The guest wishlist, defaulting to empty when absent or unparsable.
pub async fn guest_wishlist(session: &Session) -> Wishlist {
    session
        .get::<Wishlist>(keys::GUEST_WISHLIST)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the guest wishlist.
pub async fn save_guest_wishlist(
    session: &Session,
    wishlist: &Wishlist,
) -> Result<(), SessionError> {
    session.insert(keys::GUEST_WISHLIST, wishlist).await
}

/// Clear the guest cart and wishlist entries.
///
/// Called after a successful login merge - the merged state now lives
/// remotely, and leaving the guest entries behind would double-count on
/// the next login.
pub async fn clear_guest_state(session: &Session) -> Result<(), SessionError> {
    session.remove::<Cart>(keys::GUEST_CART).await?;
    session.remove::<Wishlist>(keys::GUEST_WISHLIST).await?;
    Ok(())
}

/// The popup's lifecycle step this session.
pub async fn popup_step(session: &Session) -> PopupStep {
    session
        .get::<PopupStep>(keys::POPUP_STEP)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the popup's lifecycle step.
pub async fn set_popup_step(session: &Session, step: PopupStep) -> Result<(), SessionError> {
    session.insert(keys::POPUP_STEP, step).await
}
