//! Cart and wishlist collections, and the sign-in merge.
//!
//! A guest browses with cart/wishlist state held in their session; an
//! authenticated customer's state lives in the remote store. At sign-in the
//! two are reconciled by [`merge_carts`] and [`merge_wishlists`]. Both merges
//! are pure functions of their inputs - no I/O - which is what the sync
//! service and its tests rely on.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A single cart line: one product and how many of it.
///
/// Unique by `product_id` within a [`Cart`]; the quantity is always >= 1
/// (dropping to zero removes the line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartItem {
    /// Create a new cart item.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A shopping cart: an ordered sequence of [`CartItem`]s, unique by product.
///
/// Insertion order is preserved for display, but the merge logic treats the
/// cart as a map keyed by `product_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Quantity for a product, or 0 if it is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Add a product to the cart.
    ///
    /// If the product is already present its quantity is increased by
    /// `quantity`; otherwise a new line is appended. Adding zero is a no-op.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem::new(product_id, quantity));
        }
    }

    /// Set the quantity for a product.
    ///
    /// A quantity of 0 removes the line. Setting a quantity for a product
    /// not in the cart appends a new line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        } else {
            self.items.push(CartItem::new(product_id, quantity));
        }
    }

    /// Remove a product's line entirely.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        // Collapse any duplicate product lines from untrusted input
        let mut cart = Self::new();
        for item in items {
            cart.add(item.product_id, item.quantity);
        }
        cart
    }
}

/// A wishlist: an ordered set of product IDs.
///
/// Insertion order is preserved for display only; membership is what the
/// merge cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<ProductId>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// The product IDs, in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Number of products in the wishlist.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the wishlist contains a product.
    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.ids.contains(&product_id)
    }

    /// Add a product. Idempotent: a product already present is not duplicated.
    ///
    /// Returns `true` if the product was newly added.
    pub fn insert(&mut self, product_id: ProductId) -> bool {
        if self.contains(product_id) {
            false
        } else {
            self.ids.push(product_id);
            true
        }
    }

    /// Remove a product. Returns `true` if it was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| *id != product_id);
        self.ids.len() != before
    }
}

impl From<Vec<ProductId>> for Wishlist {
    fn from(ids: Vec<ProductId>) -> Self {
        let mut wishlist = Self::new();
        for id in ids {
            wishlist.insert(id);
        }
        wishlist
    }
}

/// Merge a remote cart with a local (guest) cart.
///
/// Iterates the remote items then the local items; lines for the same
/// product have their quantities summed, lines seen for the first time are
/// appended. Quantities are summed, not maxed or overwritten - two units in
/// the guest cart plus one unit remotely is three units merged.
///
/// Merging a cart with itself therefore doubles quantities; callers must
/// only merge a guest cart once (the sync service clears guest state after
/// a successful write-back).
#[must_use]
pub fn merge_carts(remote: &Cart, local: &Cart) -> Cart {
    let mut merged = Cart::new();
    for item in remote.items().iter().chain(local.items()) {
        merged.add(item.product_id, item.quantity);
    }
    merged
}

/// Merge a remote wishlist with a local (guest) wishlist.
///
/// Set union with duplicates collapsed; remote entries come first, then
/// local entries not already present. Order is for display only and is not
/// part of the contract.
#[must_use]
pub fn merge_wishlists(remote: &Wishlist, local: &Wishlist) -> Wishlist {
    let mut merged = Wishlist::new();
    for id in remote.ids().iter().chain(local.ids()) {
        merged.insert(*id);
    }
    merged
}
