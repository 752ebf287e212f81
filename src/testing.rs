//! Testing utilities for storefront flows.
//!
//! [`MockApi`] implements [`StorefrontApi`] entirely in memory and records
//! every call, so tests can assert not only on outcomes but on the absence
//! of network traffic — the client-side guards are specified as "no request
//! is sent". The [`fake`] module builds consistent wire-shaped fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use tokoku::testing::{fake, ApiCall, MockApi};
//!
//! #[tokio::test]
//! async fn nothing_is_sent() {
//!     let api = MockApi::new().with_cart(fake::cart_two_lines());
//!     // ... drive a flow ...
//!     assert!(api.calls().is_empty());
//! }
//! ```

use crate::api::types::{
    AddCartItem, AuthToken, Cart, CartItem, Credentials, NewOrder, NewProduct, Order,
    OrderExtended, OrderItem, OrderStatus, PayOrder, PaymentConfirmation, Product, ProductPatch,
    RegisterUser, UpdateCartItem, UserProfile,
};
use crate::api::{ApiError, ApiResult, StorefrontApi};
use crate::session::Session;
use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// One recorded API interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Login,
    Register,
    ListProducts,
    GetProduct { product_id: i64 },
    FetchCart,
    AddCartItem { product_id: i64, quantity: i64 },
    UpdateCartItem { item_id: i64, quantity: i64 },
    RemoveCartItem { item_id: i64 },
    ClearCart,
    CreateOrder { line_count: usize },
    ListOrders,
    PayOrder { order_id: i64, method: String },
    MyProducts,
    CreateProduct,
    UpdateProduct { product_id: i64 },
    DeleteProduct { product_id: i64 },
}

#[derive(Default)]
struct MockState {
    calls: Vec<ApiCall>,
    cart: Option<Cart>,
    orders: Vec<OrderExtended>,
    products: Vec<Product>,
    login: Option<(String, UserProfile)>,
    created_order_id: Option<i64>,
    reject_next: Option<String>,
    clear_cart_failure: Option<String>,
}

/// Recording in-memory implementation of [`StorefrontApi`].
///
/// Clones share state, so a flow can own one handle while the test keeps
/// another for assertions.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
    next_id: Arc<AtomicI64>,
}

impl MockApi {
    /// Create a mock with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Serve this cart from `GET /cart/`.
    #[must_use]
    pub fn with_cart(self, cart: Cart) -> Self {
        self.lock().cart = Some(cart);
        self
    }

    /// Serve these orders from the extended order listing.
    #[must_use]
    pub fn with_orders(self, orders: Vec<OrderExtended>) -> Self {
        self.lock().orders = orders;
        self
    }

    /// Serve these products from the catalog endpoints.
    #[must_use]
    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.lock().products = products;
        self
    }

    /// Answer the next login with this token and profile.
    #[must_use]
    pub fn with_login(self, token: impl Into<String>, user: UserProfile) -> Self {
        self.lock().login = Some((token.into(), user));
        self
    }

    /// Assign this id to the next created order.
    #[must_use]
    pub fn with_created_order_id(self, order_id: i64) -> Self {
        self.lock().created_order_id = Some(order_id);
        self
    }

    /// Reject the next call with a backend-style detail message.
    #[must_use]
    pub fn reject_next(self, detail: impl Into<String>) -> Self {
        self.lock().reject_next = Some(detail.into());
        self
    }

    /// Fail every `DELETE /cart/` with a transport error.
    #[must_use]
    pub fn fail_clear_cart(self, message: impl Into<String>) -> Self {
        self.lock().clear_cart_failure = Some(message.into());
        self
    }

    /// Everything recorded so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Record the call, then honor a pending `reject_next`.
    fn begin(&self, call: ApiCall) -> ApiResult<()> {
        let mut state = self.lock();
        state.calls.push(call);
        if let Some(detail) = state.reject_next.take() {
            return Err(ApiError::Rejected {
                status: 400,
                detail,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for MockApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockApi")
            .field("calls", &self.lock().calls.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl StorefrontApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthToken> {
        self.begin(ApiCall::Login)?;
        let (token, mut user) = self
            .lock()
            .login
            .clone()
            .unwrap_or_else(|| ("mock-token".to_string(), fake::buyer()));
        user.username = credentials.username.clone();
        Ok(AuthToken {
            access_token: token,
            token_type: "bearer".to_string(),
            user,
        })
    }

    async fn register(&self, user: &RegisterUser) -> ApiResult<UserProfile> {
        self.begin(ApiCall::Register)?;
        Ok(UserProfile {
            id: self.next_id(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            is_active: true,
            is_seller: user.is_seller,
            created_at: fake::timestamp(),
        })
    }

    async fn list_products(
        &self,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Vec<Product>> {
        self.begin(ApiCall::ListProducts)?;
        let mut products = self.lock().products.clone();
        if let Some(category) = category {
            products.retain(|p| p.category.as_deref() == Some(category));
        }
        if let Some(limit) = limit {
            products.truncate(limit as usize);
        }
        Ok(products)
    }

    async fn get_product(&self, product_id: i64) -> ApiResult<Product> {
        self.begin(ApiCall::GetProduct { product_id })?;
        self.lock()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or(ApiError::Rejected {
                status: 404,
                detail: "Produk tidak ditemukan".to_string(),
            })
    }

    async fn fetch_cart(&self, _session: &Session) -> ApiResult<Cart> {
        self.begin(ApiCall::FetchCart)?;
        Ok(self.lock().cart.clone().unwrap_or_else(fake::empty_cart))
    }

    async fn add_cart_item(&self, _session: &Session, item: &AddCartItem) -> ApiResult<CartItem> {
        self.begin(ApiCall::AddCartItem {
            product_id: item.product_id,
            quantity: item.quantity,
        })?;
        let product = self
            .lock()
            .products
            .iter()
            .find(|p| p.id == item.product_id)
            .cloned()
            .unwrap_or_else(|| fake::product(item.product_id, "Produk", 10_000.0, 10));
        Ok(fake::cart_item(self.next_id(), product, item.quantity))
    }

    async fn update_cart_item(
        &self,
        _session: &Session,
        item_id: i64,
        update: &UpdateCartItem,
    ) -> ApiResult<CartItem> {
        self.begin(ApiCall::UpdateCartItem {
            item_id,
            quantity: update.quantity,
        })?;
        let existing = self
            .lock()
            .cart
            .as_ref()
            .and_then(|cart| cart.items.iter().find(|i| i.id == item_id).cloned());
        match existing {
            Some(mut item) => {
                item.quantity = update.quantity;
                Ok(item)
            }
            None => Err(ApiError::Rejected {
                status: 404,
                detail: "Item tidak ditemukan di keranjang".to_string(),
            }),
        }
    }

    async fn remove_cart_item(&self, _session: &Session, item_id: i64) -> ApiResult<()> {
        self.begin(ApiCall::RemoveCartItem { item_id })?;
        Ok(())
    }

    async fn clear_cart(&self, _session: &Session) -> ApiResult<()> {
        self.begin(ApiCall::ClearCart)?;
        if let Some(message) = self.lock().clear_cart_failure.clone() {
            return Err(ApiError::transport(message));
        }
        Ok(())
    }

    async fn create_order(&self, _session: &Session, order: &NewOrder) -> ApiResult<Order> {
        self.begin(ApiCall::CreateOrder {
            line_count: order.items.len(),
        })?;
        let id = self
            .lock()
            .created_order_id
            .unwrap_or_else(|| self.next_id());
        let total_amount = order
            .items
            .iter()
            .map(|line| line.price * line.quantity as f64)
            .sum();
        Ok(Order {
            id,
            buyer_id: 1,
            total_amount,
            status: OrderStatus::Pending,
            shipping_address: order.shipping_address.clone(),
            created_at: fake::timestamp(),
            items: order
                .items
                .iter()
                .map(|line| OrderItem {
                    id: self.next_id(),
                    product_id: line.product_id,
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
        })
    }

    async fn list_orders(&self, _session: &Session) -> ApiResult<Vec<OrderExtended>> {
        self.begin(ApiCall::ListOrders)?;
        Ok(self.lock().orders.clone())
    }

    async fn pay_order(
        &self,
        _session: &Session,
        order_id: i64,
        payment: &PayOrder,
    ) -> ApiResult<PaymentConfirmation> {
        self.begin(ApiCall::PayOrder {
            order_id,
            method: payment.payment_method.clone(),
        })?;
        Ok(PaymentConfirmation {
            message: "Pembayaran berhasil!".to_string(),
            order_id,
            status: OrderStatus::Paid,
            payment_method: payment.payment_method.clone(),
        })
    }

    async fn my_products(&self, _session: &Session) -> ApiResult<Vec<Product>> {
        self.begin(ApiCall::MyProducts)?;
        Ok(self.lock().products.clone())
    }

    async fn create_product(&self, session: &Session, product: &NewProduct) -> ApiResult<Product> {
        self.begin(ApiCall::CreateProduct)?;
        Ok(Product {
            id: self.next_id(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            seller_id: session.user().id,
            created_at: fake::timestamp(),
        })
    }

    async fn update_product(
        &self,
        _session: &Session,
        product_id: i64,
        patch: &ProductPatch,
    ) -> ApiResult<Product> {
        self.begin(ApiCall::UpdateProduct { product_id })?;
        let mut product = self
            .lock()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or(ApiError::Rejected {
                status: 404,
                detail: "Produk tidak ditemukan".to_string(),
            })?;
        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(description) = &patch.description {
            product.description = Some(description.clone());
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(image_url) = &patch.image_url {
            product.image_url = Some(image_url.clone());
        }
        if let Some(category) = &patch.category {
            product.category = Some(category.clone());
        }
        Ok(product)
    }

    async fn delete_product(&self, _session: &Session, product_id: i64) -> ApiResult<()> {
        self.begin(ApiCall::DeleteProduct { product_id })?;
        Ok(())
    }
}

/// Wire-shaped test fixtures.
pub mod fake {
    use super::*;
    use chrono::NaiveDateTime;

    /// Fixed timestamp used across fixtures.
    #[must_use]
    pub fn timestamp() -> NaiveDateTime {
        "2026-08-01T10:00:00"
            .parse()
            .unwrap_or_default()
    }

    /// A buyer profile.
    #[must_use]
    pub fn buyer() -> UserProfile {
        UserProfile {
            id: 1,
            email: "budi@example.com".to_string(),
            username: "budi".to_string(),
            full_name: Some("Budi Santoso".to_string()),
            phone: Some("081234567890".to_string()),
            is_active: true,
            is_seller: false,
            created_at: timestamp(),
        }
    }

    /// A seller profile.
    #[must_use]
    pub fn seller() -> UserProfile {
        UserProfile {
            id: 2,
            email: "sari@example.com".to_string(),
            username: "sari".to_string(),
            full_name: Some("Sari Dewi".to_string()),
            phone: None,
            is_active: true,
            is_seller: true,
            created_at: timestamp(),
        }
    }

    /// A product with the given id, name, price, and stock.
    #[must_use]
    pub fn product(id: i64, name: &str, price: f64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            price,
            stock,
            image_url: None,
            category: None,
            seller_id: 2,
            created_at: timestamp(),
        }
    }

    /// A product-creation payload.
    #[must_use]
    pub fn new_product(name: &str, price: f64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            price,
            stock,
            image_url: None,
            category: None,
        }
    }

    /// One cart line holding the given product.
    #[must_use]
    pub fn cart_item(id: i64, product: Product, quantity: i64) -> CartItem {
        CartItem {
            id,
            user_id: 1,
            product_id: product.id,
            quantity,
            created_at: timestamp(),
            product,
        }
    }

    /// A cart with no lines.
    #[must_use]
    pub fn empty_cart() -> Cart {
        Cart {
            total_items: 0,
            total_quantity: 0,
            total_price: 0.0,
            items: Vec::new(),
        }
    }

    /// The canonical two-line cart: qty 1 × Rp 10.000 plus qty 2 × Rp 5.000,
    /// so `total_quantity` is 3 and `total_price` is 20.000.
    #[must_use]
    pub fn cart_two_lines() -> Cart {
        let kopi = product(101, "Kopi Gayo 250g", 10_000.0, 5);
        let teh = product(102, "Teh Melati", 5_000.0, 10);
        Cart {
            total_items: 2,
            total_quantity: 3,
            total_price: 20_000.0,
            items: vec![cart_item(7, kopi, 1), cart_item(8, teh, 2)],
        }
    }

    /// An extended order with one line, in the given status.
    #[must_use]
    pub fn order_extended(id: i64, status: OrderStatus, total_amount: f64) -> OrderExtended {
        OrderExtended {
            id,
            buyer_id: 1,
            total_amount,
            status,
            shipping_address: "Jl. Sudirman No. 10, Jakarta".to_string(),
            created_at: timestamp(),
            items: vec![crate::api::types::OrderItemExtended {
                id: id * 10,
                product_id: 101,
                quantity: 1,
                price: total_amount,
                product: crate::api::types::ProductInOrder {
                    id: 101,
                    name: "Kopi Gayo 250g".to_string(),
                    price: total_amount,
                    image_url: None,
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_calls_in_order() {
        let api = MockApi::new().with_products(vec![fake::product(1, "Kopi", 10_000.0, 5)]);
        api.list_products(None, None).await.unwrap();
        api.get_product(1).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![ApiCall::ListProducts, ApiCall::GetProduct { product_id: 1 }]
        );
    }

    #[tokio::test]
    async fn reject_next_fires_once() {
        let api = MockApi::new().reject_next("nope");
        let err = api.list_products(None, None).await.unwrap_err();
        assert!(err.is_rejection());
        assert!(api.list_products(None, None).await.is_ok());
    }

    #[test]
    fn canonical_cart_matches_its_aggregates() {
        let cart = fake::cart_two_lines();
        let quantity: i64 = cart.items.iter().map(|i| i.quantity).sum();
        let price: f64 = cart
            .items
            .iter()
            .map(|i| i.product.price * i.quantity as f64)
            .sum();
        assert_eq!(quantity, cart.total_quantity);
        assert_eq!(price, cart.total_price);
    }
}
