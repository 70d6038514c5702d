//! Per-customer cart/wishlist document storage.
//!
//! One row per customer: `storefront.customer_state (user_id, cart JSONB,
//! wishlist JSONB)`. Writes are column-scoped merge-upserts - saving the
//! cart never touches the wishlist column and vice versa, and the row is
//! created on first write. A malformed stored document is treated as empty
//! rather than as a fatal error, so a bad write can never lock a customer
//! out of their cart.

use sqlx::{PgPool, Row};

use fernway_core::UserId;
use fernway_core::cart::{Cart, Wishlist};

use super::RepositoryError;
use crate::services::sync::{CustomerState, CustomerStateStore};

/// Repository for the per-customer state document.
#[derive(Debug, Clone)]
pub struct CustomerStateRepository {
    pool: PgPool,
}

impl CustomerStateRepository {
    /// Create a new customer state repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn decode_cart(user_id: UserId, value: &serde_json::Value) -> Cart {
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!("malformed cart document for user {user_id}, treating as empty: {e}");
            Cart::new()
        })
    }

    fn decode_wishlist(user_id: UserId, value: &serde_json::Value) -> Wishlist {
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            tracing::warn!(
                "malformed wishlist document for user {user_id}, treating as empty: {e}"
            );
            Wishlist::new()
        })
    }
}

impl CustomerStateStore for CustomerStateRepository {
    /// Load a customer's state. A customer with no row yet gets the empty
    /// state.
    async fn load(&self, user_id: UserId) -> Result<CustomerState, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT cart, wishlist
            FROM storefront.customer_state
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(CustomerState::default());
        };

        let cart: serde_json::Value = row.try_get("cart")?;
        let wishlist: serde_json::Value = row.try_get("wishlist")?;

        Ok(CustomerState {
            cart: Self::decode_cart(user_id, &cart),
            wishlist: Self::decode_wishlist(user_id, &wishlist),
        })
    }

    /// Upsert only the cart column.
    async fn save_cart(&self, user_id: UserId, cart: &Cart) -> Result<(), RepositoryError> {
        let cart = serde_json::to_value(cart)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO storefront.customer_state (user_id, cart)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET cart = EXCLUDED.cart, updated_at = NOW()
            ",
        )
        .bind(user_id.as_i32())
        .bind(cart)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert only the wishlist column.
    async fn save_wishlist(
        &self,
        user_id: UserId,
        wishlist: &Wishlist,
    ) -> Result<(), RepositoryError> {
        let wishlist = serde_json::to_value(wishlist)
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO storefront.customer_state (user_id, wishlist)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET wishlist = EXCLUDED.wishlist, updated_at = NOW()
            ",
        )
        .bind(user_id.as_i32())
        .bind(wishlist)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
