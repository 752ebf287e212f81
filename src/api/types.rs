//! Wire types for the storefront REST contract.
//!
//! Field names and optionality mirror the backend schemas exactly. Monetary
//! amounts are `f64` because that is what the backend serializes; totals are
//! never recomputed client-side from these values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ============================================================================
// Catalog
// ============================================================================

/// A product as served by `/products/` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub seller_id: i64,
    pub created_at: NaiveDateTime,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Payload for creating a product (seller only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Partial update for a product (seller only). `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

// ============================================================================
// Cart
// ============================================================================

/// One cart line, with its denormalized product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub created_at: NaiveDateTime,
    pub product: Product,
}

/// The server-held cart with backend-computed aggregates.
///
/// `total_price` is authoritative; the client displays it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub total_items: i64,
    pub total_quantity: i64,
    pub total_price: f64,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Payload for `POST /cart/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Payload for `PUT /cart/{item_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItem {
    pub quantity: i64,
}

// ============================================================================
// Orders
// ============================================================================

/// Order status as reported by the backend.
///
/// Transitions are backend-enforced and monotonic
/// (`pending → paid → shipped → delivered`, or `pending → cancelled`).
/// Unknown values deserialize as [`OrderStatus::Other`] so forward-compatible
/// statuses still render, with the raw string and a default badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
    /// A status this client does not know about.
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "paid" => Self::Paid,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Pending => "pending".to_string(),
            OrderStatus::Paid => "paid".to_string(),
            OrderStatus::Shipped => "shipped".to_string(),
            OrderStatus::Delivered => "delivered".to_string(),
            OrderStatus::Cancelled => "cancelled".to_string(),
            OrderStatus::Other(raw) => raw,
        }
    }
}

impl OrderStatus {
    /// User-facing label. Total over the enum; unknown statuses show the raw string.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Pending => "⏳ Menunggu Pembayaran".to_string(),
            Self::Paid => "✅ Sudah Dibayar".to_string(),
            Self::Shipped => "🚚 Sedang Dikirim".to_string(),
            Self::Delivered => "📦 Selesai".to_string(),
            Self::Cancelled => "❌ Dibatalkan".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }

    /// Visual badge class. Unknown statuses fall back to the pending badge.
    #[must_use]
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Pending | Self::Other(_) => "status-pending",
            Self::Paid => "status-paid",
            Self::Shipped => "status-shipped",
            Self::Delivered => "status-delivered",
            Self::Cancelled => "status-cancelled",
        }
    }

    /// Only pending orders can be sent to the payment page.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// One snapshot line inside an order-creation request.
///
/// `price` is captured from the cart at snapshot time and not re-validated
/// against the current product price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

/// Payload for `POST /orders/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub shipping_address: String,
    pub items: Vec<OrderLine>,
}

/// An order as returned by `POST /orders/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub buyer_id: i64,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItem>,
}

/// One stored order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
}

/// Product fields denormalized into extended order listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInOrder {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image_url: Option<String>,
}

/// One line of an extended order, with its product snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemExtended {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub product: ProductInOrder,
}

impl OrderItemExtended {
    /// Line subtotal as displayed on the order card.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// An order from `GET /orders/extended/all`, with denormalized product data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderExtended {
    pub id: i64,
    pub buyer_id: i64,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub created_at: NaiveDateTime,
    pub items: Vec<OrderItemExtended>,
}

/// Payload for `POST /orders/{id}/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayOrder {
    pub payment_method: String,
}

/// Response from `POST /orders/{id}/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub message: String,
    pub order_id: i64,
    pub status: OrderStatus,
    pub payment_method: String,
}

// ============================================================================
// Auth
// ============================================================================

/// The authenticated user's profile, cached in client storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_active: bool,
    pub is_seller: bool,
    pub created_at: NaiveDateTime,
}

impl UserProfile {
    /// Name used in greetings: full name when present, username otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

/// Payload for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub is_seller: bool,
}

/// Response from `POST /auth/login`: bearer token plus the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_round_trips_raw_string() {
        let status: OrderStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, OrderStatus::Other("refunded".to_string()));
        assert_eq!(status.label(), "refunded");
        assert_eq!(status.badge(), "status-pending");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"refunded\"");
    }

    #[test]
    fn known_statuses_deserialize() {
        let status: OrderStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(status, OrderStatus::Paid);
        assert!(!status.is_payable());
        assert!(OrderStatus::Pending.is_payable());
    }

    #[test]
    fn cart_deserializes_backend_shape() {
        let json = r#"{
            "total_items": 1,
            "total_quantity": 2,
            "total_price": 10000.0,
            "items": [{
                "id": 7,
                "user_id": 1,
                "product_id": 3,
                "quantity": 2,
                "created_at": "2026-08-01T10:00:00",
                "product": {
                    "id": 3,
                    "name": "Kopi Gayo 250g",
                    "description": null,
                    "price": 5000.0,
                    "stock": 10,
                    "image_url": null,
                    "category": "food",
                    "seller_id": 2,
                    "created_at": "2026-07-01T08:30:00"
                }
            }]
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert!(!cart.is_empty());
        assert_eq!(cart.items[0].product.name, "Kopi Gayo 250g");
        assert!(cart.items[0].product.in_stock());
    }
}
