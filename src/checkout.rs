//! Checkout: cart snapshot to created order.
//!
//! The flow captures the cart lines (with prices as of snapshot time) when
//! it is opened; later cart mutations do not affect an open flow. Submitting
//! consumes the flow, so a double submission does not compile — the caller
//! must open a fresh flow, which re-snapshots the (now cleared) cart and
//! fails on emptiness.

use crate::api::types::{Cart, NewOrder, OrderLine};
use crate::api::StorefrontApi;
use crate::error::{Result, TokokuError};
use crate::session::{require_session, SessionStore};

/// Minimum shipping address length, in characters.
const MIN_ADDRESS_CHARS: usize = 10;

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// Backend-assigned id of the created order.
    pub order_id: i64,
    /// Backend-computed order total.
    pub total_amount: f64,
    /// Whether the follow-up cart clear succeeded.
    ///
    /// The order exists either way; a `false` here means the cart still
    /// holds the purchased lines and the front-end should say so instead of
    /// silently ignoring it.
    pub cart_cleared: bool,
}

/// One checkout attempt, opened over a loaded cart.
pub struct CheckoutFlow<A, S> {
    api: A,
    store: S,
    lines: Vec<OrderLine>,
    cart_total: f64,
}

impl<A, S> std::fmt::Debug for CheckoutFlow<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("lines", &self.lines)
            .field("cart_total", &self.cart_total)
            .finish_non_exhaustive()
    }
}

impl<A: StorefrontApi, S: SessionStore> CheckoutFlow<A, S> {
    /// Snapshot the cart into a new checkout flow.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when the cart is empty — there is
    /// nothing to order.
    pub fn open(api: A, store: S, cart: &Cart) -> Result<Self> {
        if cart.is_empty() {
            return Err(TokokuError::validation("Keranjang kosong!"));
        }

        let lines = cart
            .items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product.id,
                quantity: item.quantity,
                // Captured now; deliberately not re-validated against the
                // current product price at submit time.
                price: item.product.price,
            })
            .collect();

        Ok(Self {
            api,
            store,
            lines,
            cart_total: cart.total_price,
        })
    }

    /// The snapshotted order lines.
    #[must_use]
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// The backend-reported cart total at snapshot time, for display.
    #[must_use]
    pub fn cart_total(&self) -> f64 {
        self.cart_total
    }

    /// Check a shipping address without submitting anything.
    ///
    /// Client-side pre-flight only; the backend re-validates.
    pub fn validate_address(shipping_address: &str) -> Result<()> {
        if shipping_address.trim().chars().count() < MIN_ADDRESS_CHARS {
            return Err(TokokuError::validation(
                "Alamat pengiriman minimal 10 karakter",
            ));
        }
        Ok(())
    }

    /// Submit the order.
    ///
    /// Consumes the flow: retrying after a rejection means opening a fresh
    /// one. An invalid address fails locally, before any network call —
    /// interactive callers should run [`Self::validate_address`] first so
    /// they can re-prompt without re-opening.
    ///
    /// On success the cart clear is awaited (not fire-and-forget); a clear
    /// failure is logged and reported through
    /// [`CheckoutReceipt::cart_cleared`] while the order stands.
    pub async fn submit(self, shipping_address: &str) -> Result<CheckoutReceipt> {
        Self::validate_address(shipping_address)?;
        let session = require_session(&self.store).await?;

        let order = self
            .api
            .create_order(
                &session,
                &NewOrder {
                    shipping_address: shipping_address.trim().to_string(),
                    items: self.lines,
                },
            )
            .await?;

        tracing::info!(
            target: "tokoku::checkout",
            order_id = order.id,
            total_amount = order.total_amount,
            "order created"
        );

        let cart_cleared = match self.api.clear_cart(&session).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    target: "tokoku::checkout",
                    order_id = order.id,
                    error = %e,
                    "cart clear after checkout failed; cart still holds ordered lines"
                );
                false
            }
        };

        Ok(CheckoutReceipt {
            order_id: order.id,
            total_amount: order.total_amount,
            cart_cleared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStore, Session};
    use crate::testing::{fake, ApiCall, MockApi};

    fn authed_store() -> MemoryStore {
        MemoryStore::with_session(&Session::new("tok", fake::buyer()))
    }

    #[test]
    fn empty_cart_cannot_open_checkout() {
        let cart = fake::empty_cart();
        let err = CheckoutFlow::open(MockApi::new(), MemoryStore::new(), &cart).unwrap_err();
        assert!(matches!(err, TokokuError::Validation(_)));
    }

    #[test]
    fn snapshot_captures_price_at_open_time() {
        let cart = fake::cart_two_lines();
        let flow = CheckoutFlow::open(MockApi::new(), authed_store(), &cart).unwrap();
        assert_eq!(flow.lines().len(), 2);
        assert_eq!(flow.lines()[0].price, 10_000.0);
        assert_eq!(flow.lines()[1].price, 5_000.0);
        assert_eq!(flow.cart_total(), 20_000.0);
    }

    #[tokio::test]
    async fn short_address_is_rejected_locally() {
        let api = MockApi::new();
        let cart = fake::cart_two_lines();
        let flow = CheckoutFlow::open(api.clone(), authed_store(), &cart).unwrap();

        let err = flow.submit("Jl. A").await.unwrap_err();
        assert!(matches!(err, TokokuError::Validation(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn whitespace_does_not_pad_an_address() {
        let err = CheckoutFlow::<MockApi, MemoryStore>::validate_address("  Jl. A    ").unwrap_err();
        assert!(matches!(err, TokokuError::Validation(_)));
        CheckoutFlow::<MockApi, MemoryStore>::validate_address("Jl. Merdeka No. 17").unwrap();
    }

    #[tokio::test]
    async fn successful_submit_creates_order_then_clears_cart() {
        let api = MockApi::new().with_created_order_id(91);
        let cart = fake::cart_two_lines();
        let flow = CheckoutFlow::open(api.clone(), authed_store(), &cart).unwrap();

        let receipt = flow.submit("Jl. Sudirman No. 10, Jakarta").await.unwrap();
        assert_eq!(receipt.order_id, 91);
        assert!(receipt.cart_cleared);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::CreateOrder { line_count: 2 },
                ApiCall::ClearCart,
            ]
        );
    }

    #[tokio::test]
    async fn failed_cart_clear_is_surfaced_not_swallowed() {
        let api = MockApi::new()
            .with_created_order_id(92)
            .fail_clear_cart("boom");
        let cart = fake::cart_two_lines();
        let flow = CheckoutFlow::open(api.clone(), authed_store(), &cart).unwrap();

        let receipt = flow.submit("Jl. Sudirman No. 10, Jakarta").await.unwrap();
        assert_eq!(receipt.order_id, 92);
        assert!(!receipt.cart_cleared);
    }

    #[tokio::test]
    async fn backend_rejection_carries_detail() {
        let api = MockApi::new().reject_next("Stok Kopi Gayo 250g tidak mencukupi");
        let cart = fake::cart_two_lines();
        let flow = CheckoutFlow::open(api, authed_store(), &cart).unwrap();

        let err = flow.submit("Jl. Sudirman No. 10, Jakarta").await.unwrap_err();
        assert_eq!(
            err.rejection_detail(),
            Some("Stok Kopi Gayo 250g tidak mencukupi")
        );
    }
}
