//! Order history: status presentation and payment eligibility.

use tokoku::api::types::OrderStatus;
use tokoku::testing::{fake, MockApi};
use tokoku::{MemoryStore, OrderViewer, Session};

fn authed_store() -> MemoryStore {
    MemoryStore::with_session(&Session::new("tok", fake::buyer()))
}

#[tokio::test]
async fn empty_history_renders_empty_state() {
    let api = MockApi::new();
    let mut viewer = OrderViewer::new(api, authed_store());
    let orders = viewer.load().await.unwrap();
    assert!(orders.is_empty());
}

#[test]
fn status_labels_are_total_over_the_enum() {
    let cases = [
        (OrderStatus::Pending, "⏳ Menunggu Pembayaran", "status-pending"),
        (OrderStatus::Paid, "✅ Sudah Dibayar", "status-paid"),
        (OrderStatus::Shipped, "🚚 Sedang Dikirim", "status-shipped"),
        (OrderStatus::Delivered, "📦 Selesai", "status-delivered"),
        (OrderStatus::Cancelled, "❌ Dibatalkan", "status-cancelled"),
    ];
    for (status, label, badge) in cases {
        assert_eq!(status.label(), label);
        assert_eq!(status.badge(), badge);
    }
}

#[test]
fn unknown_status_falls_back_to_raw_string_and_default_badge() {
    // Forward compatibility: a status this client has never heard of still
    // renders.
    let status: OrderStatus = serde_json::from_str("\"on_hold\"").unwrap();
    assert_eq!(status.label(), "on_hold");
    assert_eq!(status.badge(), "status-pending");
    assert!(!status.is_payable());
}

#[tokio::test]
async fn unknown_statuses_survive_a_full_load() {
    let mut order = fake::order_extended(9, OrderStatus::Pending, 5_000.0);
    order.status = OrderStatus::Other("on_hold".to_string());
    let api = MockApi::new().with_orders(vec![order]);

    let mut viewer = OrderViewer::new(api, authed_store());
    let orders = viewer.load().await.unwrap();
    assert_eq!(orders[0].status.label(), "on_hold");
    assert!(OrderViewer::<MockApi, MemoryStore>::pay_action(&orders[0]).is_none());
}

#[test]
fn only_pending_orders_offer_pay_now() {
    let pending = fake::order_extended(1, OrderStatus::Pending, 150_000.0);
    assert!(OrderViewer::<MockApi, MemoryStore>::pay_action(&pending).is_some());

    let paid = fake::order_extended(2, OrderStatus::Paid, 150_000.0);
    assert!(OrderViewer::<MockApi, MemoryStore>::pay_action(&paid).is_none());
}

#[test]
fn line_subtotals_multiply_price_by_quantity() {
    let order = fake::order_extended(1, OrderStatus::Pending, 150_000.0);
    let item = &order.items[0];
    assert_eq!(item.subtotal(), item.price * item.quantity as f64);
}
