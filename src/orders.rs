//! Order history.
//!
//! Fetches the authenticated user's orders with denormalized product data
//! and decides, per order, whether a payment action is offered. Status
//! presentation lives on [`crate::api::types::OrderStatus`]; this module
//! only wires eligibility and navigation.

use crate::api::types::OrderExtended;
use crate::api::StorefrontApi;
use crate::error::Result;
use crate::payment::PaymentParams;
use crate::session::{require_session, SessionStore};

/// The "Bayar Sekarang" action attached to a pending order.
#[derive(Debug, Clone, PartialEq)]
pub struct PayNow {
    pub order_id: i64,
    pub amount: f64,
}

impl PayNow {
    /// Navigation parameters for the payment page, string-encoded exactly
    /// like the query string the order list has always produced.
    #[must_use]
    pub fn params(&self) -> PaymentParams {
        PaymentParams {
            order_id: self.order_id.to_string(),
            amount: self.amount.to_string(),
        }
    }
}

/// Per-visit order list controller.
pub struct OrderViewer<A, S> {
    api: A,
    store: S,
    orders: Vec<OrderExtended>,
}

impl<A: StorefrontApi, S: SessionStore> OrderViewer<A, S> {
    /// Create an order list controller for one page visit.
    #[must_use]
    pub fn new(api: A, store: S) -> Self {
        Self {
            api,
            store,
            orders: Vec::new(),
        }
    }

    /// Fetch the user's orders. Requires a valid session.
    pub async fn load(&mut self) -> Result<&[OrderExtended]> {
        let session = require_session(&self.store).await?;
        self.orders = self.api.list_orders(&session).await?;
        tracing::debug!(
            target: "tokoku::orders",
            count = self.orders.len(),
            "orders loaded"
        );
        Ok(&self.orders)
    }

    /// Orders from the most recent successful load.
    #[must_use]
    pub fn orders(&self) -> &[OrderExtended] {
        &self.orders
    }

    /// The payment action for an order, if its status allows one.
    ///
    /// Only `pending` orders are payable; every other status (including
    /// unknown forward-compatible ones) exposes no action.
    #[must_use]
    pub fn pay_action(order: &OrderExtended) -> Option<PayNow> {
        order.status.is_payable().then(|| PayNow {
            order_id: order.id,
            amount: order.total_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::OrderStatus;
    use crate::session::{MemoryStore, Session};
    use crate::testing::{fake, MockApi};

    #[tokio::test]
    async fn load_requires_session() {
        let mut viewer = OrderViewer::new(MockApi::new(), MemoryStore::new());
        assert!(viewer.load().await.is_err());
    }

    #[tokio::test]
    async fn loads_and_keeps_orders() {
        let api = MockApi::new().with_orders(vec![
            fake::order_extended(1, OrderStatus::Pending, 150_000.0),
            fake::order_extended(2, OrderStatus::Paid, 80_000.0),
        ]);
        let store = MemoryStore::with_session(&Session::new("tok", fake::buyer()));
        let mut viewer = OrderViewer::new(api, store);

        let orders = viewer.load().await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(viewer.orders().len(), 2);
    }

    #[test]
    fn only_pending_orders_are_payable() {
        let pending = fake::order_extended(42, OrderStatus::Pending, 150_000.0);
        let action = OrderViewer::<MockApi, MemoryStore>::pay_action(&pending).unwrap();
        assert_eq!(action, PayNow { order_id: 42, amount: 150_000.0 });

        for status in [
            OrderStatus::Paid,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Other("refunded".to_string()),
        ] {
            let order = fake::order_extended(43, status, 1_000.0);
            assert!(OrderViewer::<MockApi, MemoryStore>::pay_action(&order).is_none());
        }
    }

    #[test]
    fn pay_action_encodes_navigation_params() {
        let action = PayNow { order_id: 42, amount: 150_000.0 };
        let params = action.params();
        assert_eq!(params.order_id, "42");
        assert_eq!(params.amount, "150000");
    }
}
