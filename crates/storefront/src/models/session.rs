//! Session-related types.
//!
//! The session record is the guest-scoped store: everything an anonymous
//! visitor accumulates (cart, wishlist, search history, theme) plus the
//! popup's per-session lifecycle step lives here. Authenticated identity is
//! a [`CurrentUser`] entry under [`keys::CURRENT_USER`].

use serde::{Deserialize, Serialize};

use fernway_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the guest cart (cleared when a login merge succeeds).
    pub const GUEST_CART: &str = "guest_cart";

    /// Key for the guest wishlist (cleared when a login merge succeeds).
    pub const GUEST_WISHLIST: &str = "guest_wishlist";

    /// Key for the popup's lifecycle step this session.
    pub const POPUP_STEP: &str = "popup_step";

    /// Key for recent search terms (session-scoped, never synced).
    pub const SEARCH_HISTORY: &str = "search_history";

    /// Key for the theme preference (session-scoped, never synced).
    pub const THEME: &str = "theme";
}
