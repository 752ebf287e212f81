//! One full buyer journey across the flows, sharing a single client-state
//! store the way the pages share browser storage.

use std::time::Duration;
use tokoku::api::types::OrderStatus;
use tokoku::testing::{fake, MockApi};
use tokoku::{
    AuthFlow, CartManager, CheckoutFlow, AlwaysConfirm, MemoryStore, OrderViewer, PaymentConfig,
    PaymentMethod, PaymentPage,
};

#[tokio::test]
async fn login_cart_checkout_orders_pay() {
    let api = MockApi::new()
        .with_cart(fake::cart_two_lines())
        .with_created_order_id(42)
        .with_orders(vec![fake::order_extended(42, OrderStatus::Pending, 20_000.0)]);
    let store = MemoryStore::new();

    // Login persists the session every later page reads.
    let auth = AuthFlow::new(api.clone(), store.clone());
    auth.login("budi", "rahasia").await.unwrap();

    // Cart page.
    let mut cart_page = CartManager::new(api.clone(), store.clone(), AlwaysConfirm);
    let cart = cart_page.load().await.unwrap().clone();
    assert_eq!(cart.total_price, 20_000.0);

    // Checkout.
    let flow = CheckoutFlow::open(api.clone(), store.clone(), &cart).unwrap();
    let receipt = flow.submit("Jl. Sudirman No. 10, Jakarta").await.unwrap();
    assert_eq!(receipt.order_id, 42);
    assert!(receipt.cart_cleared);

    // Order list exposes the pay action.
    let mut viewer = OrderViewer::new(api.clone(), store.clone());
    viewer.load().await.unwrap();
    let action = OrderViewer::<MockApi, MemoryStore>::pay_action(&viewer.orders()[0]).unwrap();

    // Payment page.
    let config = PaymentConfig {
        window: Duration::from_secs(24 * 60 * 60),
        processing_delay: Duration::from_millis(0),
    };
    let mut page = PaymentPage::open(api.clone(), store.clone(), &action.params(), &config)
        .await
        .unwrap();
    page.select_method(PaymentMethod::Dana).unwrap();
    let paid = page.submit().await.unwrap();
    assert_eq!(paid.order_id, 42);

    // Logout ends the journey; the next page visit is unauthenticated.
    auth.logout().await.unwrap();
    let mut cart_page = CartManager::new(api, store, AlwaysConfirm);
    assert!(cart_page.load().await.is_err());
}
