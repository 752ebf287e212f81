//! Cart management.
//!
//! The cart is server-held: every mutation is followed by a full reload
//! instead of a local patch, so displayed totals and stock-derived disabled
//! states always come from the backend. The in-memory snapshot only lives
//! for the duration of one page visit.

use crate::api::types::{Cart, UpdateCartItem};
use crate::api::StorefrontApi;
use crate::confirm::Confirm;
use crate::error::Result;
use crate::session::{require_session, SessionStore};

/// Outcome of a quantity change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The backend accepted the change and the cart was reloaded.
    Applied,
    /// The requested quantity was outside `1..=max_stock`; nothing was sent.
    ///
    /// This mirrors the disabled +/- buttons: a client-side guard only, the
    /// backend remains the authority for requests that do go out.
    OutOfRange,
}

/// Outcome of a destructive cart operation that asks for confirmation first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartMutation {
    /// Confirmed, sent, and the cart was reloaded.
    Done,
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
}

/// Per-visit cart controller.
///
/// Owns the current cart snapshot explicitly instead of keeping it in
/// page-scope globals; construct one per visit and drop it on leave.
pub struct CartManager<A, S, C> {
    api: A,
    store: S,
    confirm: C,
    cart: Option<Cart>,
}

impl<A: StorefrontApi, S: SessionStore, C: Confirm> CartManager<A, S, C> {
    /// Create a cart controller for one page visit.
    #[must_use]
    pub fn new(api: A, store: S, confirm: C) -> Self {
        Self {
            api,
            store,
            confirm,
            cart: None,
        }
    }

    /// The snapshot from the most recent successful load, if any.
    #[must_use]
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    /// Fetch the cart and replace the in-memory snapshot.
    ///
    /// Requires a valid session. On failure the previous snapshot is kept,
    /// matching the page's leave-prior-state-on-error behavior.
    pub async fn load(&mut self) -> Result<&Cart> {
        let session = require_session(&self.store).await?;
        let cart = self.api.fetch_cart(&session).await?;
        tracing::debug!(
            target: "tokoku::cart",
            total_items = cart.total_items,
            total_quantity = cart.total_quantity,
            "cart loaded"
        );
        Ok(&*self.cart.insert(cart))
    }

    /// Change a line's quantity.
    ///
    /// Quantities outside `1..=max_stock` are silently ignored without a
    /// network call. On success the whole cart is reloaded.
    pub async fn update_quantity(
        &mut self,
        item_id: i64,
        new_quantity: i64,
        max_stock: i64,
    ) -> Result<QuantityChange> {
        if new_quantity < 1 || new_quantity > max_stock {
            return Ok(QuantityChange::OutOfRange);
        }

        let session = require_session(&self.store).await?;
        self.api
            .update_cart_item(
                &session,
                item_id,
                &UpdateCartItem {
                    quantity: new_quantity,
                },
            )
            .await?;
        self.load().await?;
        Ok(QuantityChange::Applied)
    }

    /// Remove one line, after confirmation.
    pub async fn remove_item(&mut self, item_id: i64, product_name: &str) -> Result<CartMutation> {
        let prompt = format!("Hapus \"{}\" dari keranjang?", product_name);
        if !self.confirm.confirm(&prompt) {
            return Ok(CartMutation::Cancelled);
        }

        let session = require_session(&self.store).await?;
        self.api.remove_cart_item(&session, item_id).await?;
        self.load().await?;
        Ok(CartMutation::Done)
    }

    /// Delete every line, after confirmation.
    pub async fn clear(&mut self) -> Result<CartMutation> {
        if !self
            .confirm
            .confirm("Yakin ingin mengosongkan seluruh keranjang?")
        {
            return Ok(CartMutation::Cancelled);
        }

        let session = require_session(&self.store).await?;
        self.api.clear_cart(&session).await?;
        self.load().await?;
        Ok(CartMutation::Done)
    }
}
