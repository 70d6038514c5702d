//! Cart/wishlist reconciliation between guest and customer state.
//!
//! A guest's cart and wishlist live in their session; a customer's live in
//! the remote store. When a guest signs in, [`SyncService::merge_on_login`]
//! reconciles the two: wishlists are unioned, cart quantities for the same
//! product are summed, and the merged result is written back remotely. The
//! caller clears the guest session entries only after that write succeeds -
//! a failed write leaves the guest state intact rather than losing it.
//!
//! After login every mutation writes through to the remote store and the
//! new state is only adopted on success; persistence failures surface as
//! errors instead of being swallowed.

use fernway_core::UserId;
use fernway_core::cart::{Cart, Wishlist, merge_carts, merge_wishlists};
use serde::{Deserialize, Serialize};

use crate::db::RepositoryError;

/// A customer's remotely stored cart and wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerState {
    pub cart: Cart,
    pub wishlist: Wishlist,
}

/// Storage seam for per-customer state.
///
/// The production implementation is the Postgres-backed
/// `CustomerStateRepository`; tests use an in-memory store. Saves are
/// column-scoped: `save_cart` must not touch the wishlist and vice versa.
#[allow(async_fn_in_trait)]
pub trait CustomerStateStore {
    /// Load a customer's state; a customer with no stored state gets the
    /// empty default. A malformed stored document is also treated as empty.
    async fn load(&self, user_id: UserId) -> Result<CustomerState, RepositoryError>;

    /// Persist only the cart.
    async fn save_cart(&self, user_id: UserId, cart: &Cart) -> Result<(), RepositoryError>;

    /// Persist only the wishlist.
    async fn save_wishlist(
        &self,
        user_id: UserId,
        wishlist: &Wishlist,
    ) -> Result<(), RepositoryError>;
}

/// Reconciliation and write-through mutations over a [`CustomerStateStore`].
pub struct SyncService<'a, S> {
    store: &'a S,
}

impl<'a, S: CustomerStateStore> SyncService<'a, S> {
    /// Create a sync service over a store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Reconcile guest state with the customer's stored state at sign-in.
    ///
    /// Wishlists are set-unioned; carts sum quantities per product. The
    /// merged result is written back (both columns) and returned for the
    /// session to adopt. With nothing in the guest state there is nothing
    /// to reconcile, so the stored state is returned without a write -
    /// this is what keeps a repeated login from double-counting.
    ///
    /// # Errors
    ///
    /// Returns an error if the load or either write-back fails; the caller
    /// must keep the guest state in that case.
    pub async fn merge_on_login(
        &self,
        user_id: UserId,
        guest_cart: &Cart,
        guest_wishlist: &Wishlist,
    ) -> Result<CustomerState, RepositoryError> {
        let remote = self.store.load(user_id).await?;

        if guest_cart.is_empty() && guest_wishlist.is_empty() {
            return Ok(remote);
        }

        let merged = CustomerState {
            cart: merge_carts(&remote.cart, guest_cart),
            wishlist: merge_wishlists(&remote.wishlist, guest_wishlist),
        };

        self.store.save_cart(user_id, &merged.cart).await?;
        self.store.save_wishlist(user_id, &merged.wishlist).await?;

        tracing::info!(
            user_id = %user_id,
            cart_items = merged.cart.items().len(),
            wishlist_items = merged.wishlist.len(),
            "merged guest state into customer state"
        );

        Ok(merged)
    }

    /// Add a product to the customer's cart and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the load or write fails (the stored cart is
    /// unchanged on a failed write).
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: fernway_core::ProductId,
        quantity: u32,
    ) -> Result<Cart, RepositoryError> {
        let mut state = self.store.load(user_id).await?;
        state.cart.add(product_id, quantity);
        self.store.save_cart(user_id, &state.cart).await?;
        Ok(state.cart)
    }

    /// Set a cart line's quantity (0 removes the line) and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the load or write fails.
    pub async fn set_cart_quantity(
        &self,
        user_id: UserId,
        product_id: fernway_core::ProductId,
        quantity: u32,
    ) -> Result<Cart, RepositoryError> {
        let mut state = self.store.load(user_id).await?;
        state.cart.set_quantity(product_id, quantity);
        self.store.save_cart(user_id, &state.cart).await?;
        Ok(state.cart)
    }

    /// Remove a product from the cart and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the load or write fails.
    pub async fn remove_from_cart(
        &self,
        user_id: UserId,
        product_id: fernway_core::ProductId,
    ) -> Result<Cart, RepositoryError> {
        let mut state = self.store.load(user_id).await?;
        state.cart.remove(product_id);
        self.store.save_cart(user_id, &state.cart).await?;
        Ok(state.cart)
    }

    /// Add a product to the wishlist and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the load or write fails.
    pub async fn add_to_wishlist(
        &self,
        user_id: UserId,
        product_id: fernway_core::ProductId,
    ) -> Result<Wishlist, RepositoryError> {
        let mut state = self.store.load(user_id).await?;
        state.wishlist.insert(product_id);
        self.store.save_wishlist(user_id, &state.wishlist).await?;
        Ok(state.wishlist)
    }

    /// Remove a product from the wishlist and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the load or write fails.
    pub async fn remove_from_wishlist(
        &self,
        user_id: UserId,
        product_id: fernway_core::ProductId,
    ) -> Result<Wishlist, RepositoryError> {
        let mut state = self.store.load(user_id).await?;
        state.wishlist.remove(product_id);
        self.store.save_wishlist(user_id, &state.wishlist).await?;
        Ok(state.wishlist)
    }

    /// Toggle wishlist membership and persist. Returns the new wishlist and
    /// whether the product is now in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the load or write fails.
    pub async fn toggle_wishlist(
        &self,
        user_id: UserId,
        product_id: fernway_core::ProductId,
    ) -> Result<(Wishlist, bool), RepositoryError> {
        let mut state = self.store.load(user_id).await?;
        let added = if state.wishlist.contains(product_id) {
            state.wishlist.remove(product_id);
            false
        } else {
            state.wishlist.insert(product_id);
            true
        };
        self.store.save_wishlist(user_id, &state.wishlist).await?;
        Ok((state.wishlist, added))
    }
}
