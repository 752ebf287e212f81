//! Storefront API boundary.
//!
//! The [`StorefrontApi`] trait is the seam between the flow controllers and
//! the transport. Production code uses [`HttpApi`]; tests use the recording
//! mock in [`crate::testing`]. Individual controllers take the trait as a
//! generic parameter so they can be exercised without a network.

mod error;
mod http;
pub mod types;

pub use error::ApiError;
pub use http::HttpApi;

use crate::session::Session;
use async_trait::async_trait;
use types::{
    AddCartItem, AuthToken, Cart, CartItem, Credentials, NewOrder, NewProduct, Order,
    OrderExtended, PayOrder, PaymentConfirmation, Product, ProductPatch, RegisterUser,
    UpdateCartItem, UserProfile,
};

/// Result type for API boundary calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// The consumed REST contract of the storefront backend.
///
/// Authenticated endpoints take the current [`Session`]; its bearer token is
/// sent as `Authorization: Bearer <token>`. Nothing here retries, caches, or
/// re-orders calls — each method is one request.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    // Auth

    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthToken>;

    /// `POST /auth/register`
    async fn register(&self, user: &RegisterUser) -> ApiResult<UserProfile>;

    // Catalog (public)

    /// `GET /products/`, optionally filtered by category and capped.
    async fn list_products(
        &self,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Vec<Product>>;

    /// `GET /products/{product_id}`
    async fn get_product(&self, product_id: i64) -> ApiResult<Product>;

    // Cart

    /// `GET /cart/`
    async fn fetch_cart(&self, session: &Session) -> ApiResult<Cart>;

    /// `POST /cart/`
    async fn add_cart_item(&self, session: &Session, item: &AddCartItem) -> ApiResult<CartItem>;

    /// `PUT /cart/{item_id}`
    async fn update_cart_item(
        &self,
        session: &Session,
        item_id: i64,
        update: &UpdateCartItem,
    ) -> ApiResult<CartItem>;

    /// `DELETE /cart/{item_id}`
    async fn remove_cart_item(&self, session: &Session, item_id: i64) -> ApiResult<()>;

    /// `DELETE /cart/`
    async fn clear_cart(&self, session: &Session) -> ApiResult<()>;

    // Orders

    /// `POST /orders/`
    async fn create_order(&self, session: &Session, order: &NewOrder) -> ApiResult<Order>;

    /// `GET /orders/extended/all`
    async fn list_orders(&self, session: &Session) -> ApiResult<Vec<OrderExtended>>;

    /// `POST /orders/{order_id}/pay`
    async fn pay_order(
        &self,
        session: &Session,
        order_id: i64,
        payment: &PayOrder,
    ) -> ApiResult<PaymentConfirmation>;

    // Seller

    /// `GET /products/my/products`
    async fn my_products(&self, session: &Session) -> ApiResult<Vec<Product>>;

    /// `POST /products/`
    async fn create_product(&self, session: &Session, product: &NewProduct) -> ApiResult<Product>;

    /// `PUT /products/{product_id}`
    async fn update_product(
        &self,
        session: &Session,
        product_id: i64,
        patch: &ProductPatch,
    ) -> ApiResult<Product>;

    /// `DELETE /products/{product_id}`
    async fn delete_product(&self, session: &Session, product_id: i64) -> ApiResult<()>;
}
