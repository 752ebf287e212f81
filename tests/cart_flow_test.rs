//! Cart page behavior against a recording mock backend.

use tokoku::testing::{fake, ApiCall, MockApi};
use tokoku::{AlwaysConfirm, CartManager, CartMutation, MemoryStore, QuantityChange, Session};

fn authed_store() -> MemoryStore {
    MemoryStore::with_session(&Session::new("tok", fake::buyer()))
}

#[tokio::test]
async fn displayed_totals_are_the_backend_aggregates() {
    // Two lines: qty 1 × 10.000 and qty 2 × 5.000.
    let api = MockApi::new().with_cart(fake::cart_two_lines());
    let mut manager = CartManager::new(api, authed_store(), AlwaysConfirm);

    let cart = manager.load().await.unwrap();
    assert_eq!(cart.total_items, 2);
    assert_eq!(cart.total_quantity, 3);
    assert_eq!(cart.total_price, 20_000.0);
}

#[tokio::test]
async fn totals_are_trusted_even_when_inconsistent() {
    // The backend aggregate wins over anything the client could recompute.
    let mut cart = fake::cart_two_lines();
    cart.total_price = 99_999.0;
    let api = MockApi::new().with_cart(cart);
    let mut manager = CartManager::new(api, authed_store(), AlwaysConfirm);

    let cart = manager.load().await.unwrap();
    assert_eq!(cart.total_price, 99_999.0);
}

#[tokio::test]
async fn zero_quantity_update_sends_no_request() {
    // updateQuantity(itemId=7, newQuantity=0, maxStock=5): no request,
    // state unchanged.
    let api = MockApi::new().with_cart(fake::cart_two_lines());
    let mut manager = CartManager::new(api.clone(), authed_store(), AlwaysConfirm);
    manager.load().await.unwrap();
    let before = manager.cart().cloned();

    let outcome = manager.update_quantity(7, 0, 5).await.unwrap();

    assert_eq!(outcome, QuantityChange::OutOfRange);
    assert_eq!(manager.cart().cloned(), before);
    assert_eq!(api.calls(), vec![ApiCall::FetchCart]);
}

#[tokio::test]
async fn over_stock_update_sends_no_request() {
    let api = MockApi::new().with_cart(fake::cart_two_lines());
    let mut manager = CartManager::new(api.clone(), authed_store(), AlwaysConfirm);
    manager.load().await.unwrap();

    assert_eq!(
        manager.update_quantity(7, 6, 5).await.unwrap(),
        QuantityChange::OutOfRange
    );
    assert_eq!(api.calls(), vec![ApiCall::FetchCart]);
}

#[tokio::test]
async fn every_accepted_mutation_is_followed_by_a_reload() {
    let api = MockApi::new().with_cart(fake::cart_two_lines());
    let mut manager = CartManager::new(api.clone(), authed_store(), AlwaysConfirm);
    manager.load().await.unwrap();

    manager.update_quantity(7, 2, 5).await.unwrap();
    manager.remove_item(8, "Teh Melati").await.unwrap();
    manager.clear().await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::FetchCart,
            ApiCall::UpdateCartItem { item_id: 7, quantity: 2 },
            ApiCall::FetchCart,
            ApiCall::RemoveCartItem { item_id: 8 },
            ApiCall::FetchCart,
            ApiCall::ClearCart,
            ApiCall::FetchCart,
        ]
    );
}

#[tokio::test]
async fn destructive_operations_are_gated_on_confirmation() {
    let api = MockApi::new().with_cart(fake::cart_two_lines());
    let store = authed_store();
    let mut manager = CartManager::new(api.clone(), store, |_: &str| false);
    manager.load().await.unwrap();

    assert_eq!(
        manager.remove_item(7, "Kopi Gayo 250g").await.unwrap(),
        CartMutation::Cancelled
    );
    assert_eq!(manager.clear().await.unwrap(), CartMutation::Cancelled);
    assert_eq!(api.calls(), vec![ApiCall::FetchCart]);
}

#[tokio::test]
async fn unauthenticated_cart_load_never_reaches_the_backend() {
    let api = MockApi::new();
    let mut manager = CartManager::new(api.clone(), MemoryStore::new(), AlwaysConfirm);

    let err = manager.load().await.unwrap_err();
    assert!(matches!(err, tokoku::TokokuError::Unauthenticated));
    assert!(api.calls().is_empty());
}
