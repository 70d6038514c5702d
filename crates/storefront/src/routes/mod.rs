//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (database)
//!
//! # Auth
//! POST /api/auth/register          - Create account (merges guest state)
//! POST /api/auth/login             - Login (merges guest state)
//! POST /api/auth/logout            - Logout (flushes session)
//! GET  /api/auth/me                - Current user
//!
//! # Cart
//! GET    /api/cart                 - Show cart
//! POST   /api/cart/items           - Add item
//! PUT    /api/cart/items/{id}      - Set quantity (0 removes)
//! DELETE /api/cart/items/{id}      - Remove item
//! GET    /api/cart/count           - Count badge
//!
//! # Wishlist
//! GET    /api/wishlist             - Show wishlist
//! PUT    /api/wishlist/{id}        - Add product
//! DELETE /api/wishlist/{id}        - Remove product
//! POST   /api/wishlist/{id}/toggle - Toggle membership
//!
//! # Popup
//! GET  /api/popup                  - Launch payload (trigger plan + render)
//! POST /api/popup/shown            - A trigger fired
//! POST /api/popup/dismiss          - Closed; terminal for the session
//! POST /api/popup/subscribe        - Email capture
//! POST /api/popup/spin             - Spin the wheel
//!
//! # Catalog
//! GET  /api/products               - Product listing
//! GET  /api/products/{id}          - Product detail
//!
//! # Preferences (session-scoped)
//! GET    /api/prefs                - Theme + search history
//! PUT    /api/prefs/theme          - Set theme
//! POST   /api/prefs/search-history - Record a search term
//! DELETE /api/prefs/search-history - Clear search history
//! ```

pub mod auth;
pub mod cart;
pub mod popup;
pub mod prefs;
pub mod products;
pub mod session_state;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route(
            "/items/{product_id}",
            put(cart::update).delete(cart::remove),
        )
        .route("/count", get(cart::count))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route(
            "/{product_id}",
            put(wishlist::add).delete(wishlist::remove),
        )
        .route("/{product_id}/toggle", post(wishlist::toggle))
}

/// Create the popup routes router.
pub fn popup_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(popup::launch))
        .route("/shown", post(popup::shown))
        .route("/dismiss", post(popup::dismiss))
        .route("/subscribe", post(popup::subscribe))
        .route("/spin", post(popup::spin_wheel))
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the preferences routes router.
pub fn prefs_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(prefs::show))
        .route("/theme", put(prefs::set_theme))
        .route(
            "/search-history",
            post(prefs::record_search).delete(prefs::clear_search_history),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/wishlist", wishlist_routes())
        .nest("/api/popup", popup_routes())
        .nest("/api/products", product_routes())
        .nest("/api/prefs", prefs_routes())
}
