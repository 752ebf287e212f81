//! Product catalog browsing and seller product management.
//!
//! Browsing is public; adding to the cart and everything on the seller
//! dashboard is authenticated. Seller access is additionally gated on the
//! profile's seller flag, refused locally before any request.

use crate::api::types::{AddCartItem, CartItem, NewProduct, Product, ProductPatch};
use crate::api::StorefrontApi;
use crate::confirm::Confirm;
use crate::error::{Result, TokokuError};
use crate::session::{require_session, SessionStore};

/// How many related products a detail page shows.
const RELATED_LIMIT: usize = 3;

/// Public catalog browsing, plus add-to-cart.
pub struct Catalog<A, S> {
    api: A,
    store: S,
}

impl<A: StorefrontApi, S: SessionStore> Catalog<A, S> {
    /// Create a catalog controller.
    #[must_use]
    pub fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// List products, optionally filtered by category.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Product>> {
        Ok(self.api.list_products(category, None).await?)
    }

    /// Fetch one product.
    pub async fn get(&self, product_id: i64) -> Result<Product> {
        Ok(self.api.get_product(product_id).await?)
    }

    /// Products related to the given one: same category, the product itself
    /// filtered out, at most three.
    pub async fn related(&self, product: &Product) -> Result<Vec<Product>> {
        let Some(category) = product.category.as_deref() else {
            return Ok(Vec::new());
        };
        let mut related = self
            .api
            .list_products(Some(category), Some(RELATED_LIMIT as u32 + 1))
            .await?;
        related.retain(|p| p.id != product.id);
        related.truncate(RELATED_LIMIT);
        Ok(related)
    }

    /// Put a product in the cart.
    ///
    /// Pre-flight guards mirror the detail page: an out-of-stock product
    /// cannot be bought, and the quantity must stay within
    /// `1..=product.stock`. The backend re-validates either way.
    pub async fn add_to_cart(&self, product: &Product, quantity: i64) -> Result<CartItem> {
        if !product.in_stock() {
            return Err(TokokuError::validation("Produk tidak tersedia!"));
        }
        if quantity < 1 || quantity > product.stock {
            return Err(TokokuError::validation("Jumlah melebihi stok tersedia"));
        }

        let session = require_session(&self.store).await?;
        let item = self
            .api
            .add_cart_item(
                &session,
                &AddCartItem {
                    product_id: product.id,
                    quantity,
                },
            )
            .await?;
        tracing::debug!(
            target: "tokoku::catalog",
            product_id = product.id,
            quantity,
            "added to cart"
        );
        Ok(item)
    }
}

/// Aggregates shown at the top of the seller dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_stock: i64,
    /// Σ price × stock over the seller's products.
    pub total_value: f64,
}

impl DashboardStats {
    /// Compute the aggregates from a fetched product list.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            total_products: products.len(),
            total_stock: products.iter().map(|p| p.stock).sum(),
            total_value: products
                .iter()
                .map(|p| p.price * p.stock as f64)
                .sum(),
        }
    }
}

/// Seller product management.
pub struct SellerDashboard<A, S, C> {
    api: A,
    store: S,
    confirm: C,
}

impl<A: StorefrontApi, S: SessionStore, C: Confirm> SellerDashboard<A, S, C> {
    /// Create a seller dashboard controller.
    #[must_use]
    pub fn new(api: A, store: S, confirm: C) -> Self {
        Self { api, store, confirm }
    }

    /// Load the session and refuse non-sellers before any request goes out.
    async fn require_seller(&self) -> Result<crate::session::Session> {
        let session = require_session(&self.store).await?;
        if !session.is_seller() {
            return Err(TokokuError::forbidden(
                "Akses ditolak! Hanya seller yang bisa mengakses halaman ini.",
            ));
        }
        Ok(session)
    }

    /// The seller's own products.
    pub async fn my_products(&self) -> Result<Vec<Product>> {
        let session = self.require_seller().await?;
        Ok(self.api.my_products(&session).await?)
    }

    /// Create a product, mirroring the backend's price/stock rules as a
    /// pre-flight check.
    pub async fn create(&self, product: NewProduct) -> Result<Product> {
        if product.price <= 0.0 {
            return Err(TokokuError::validation("Harga harus lebih dari 0"));
        }
        if product.stock < 0 {
            return Err(TokokuError::validation("Stock tidak boleh negatif"));
        }

        let session = self.require_seller().await?;
        let created = self.api.create_product(&session, &product).await?;
        tracing::info!(
            target: "tokoku::seller",
            product_id = created.id,
            "product created"
        );
        Ok(created)
    }

    /// Update a product. Absent patch fields are left unchanged.
    pub async fn update(&self, product_id: i64, patch: ProductPatch) -> Result<Product> {
        if matches!(patch.price, Some(price) if price <= 0.0) {
            return Err(TokokuError::validation("Harga harus lebih dari 0"));
        }
        if matches!(patch.stock, Some(stock) if stock < 0) {
            return Err(TokokuError::validation("Stock tidak boleh negatif"));
        }

        let session = self.require_seller().await?;
        Ok(self.api.update_product(&session, product_id, &patch).await?)
    }

    /// Delete a product, after confirmation.
    ///
    /// Returns `false` when the user declined; nothing is sent in that case.
    pub async fn delete(&self, product_id: i64, product_name: &str) -> Result<bool> {
        let prompt = format!(
            "Apakah Anda yakin ingin menghapus produk \"{}\"?",
            product_name
        );
        if !self.confirm.confirm(&prompt) {
            return Ok(false);
        }

        let session = self.require_seller().await?;
        self.api.delete_product(&session, product_id).await?;
        tracing::info!(
            target: "tokoku::seller",
            product_id,
            "product deleted"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AlwaysConfirm;
    use crate::session::{MemoryStore, Session};
    use crate::testing::{fake, ApiCall, MockApi};

    fn seller_store() -> MemoryStore {
        MemoryStore::with_session(&Session::new("tok", fake::seller()))
    }

    #[tokio::test]
    async fn browsing_needs_no_session() {
        let api = MockApi::new().with_products(vec![fake::product(1, "Kopi", 10_000.0, 5)]);
        let catalog = Catalog::new(api, MemoryStore::new());
        let products = catalog.list(None).await.unwrap();
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn related_filters_self_and_caps_at_three() {
        let mut products: Vec<Product> = (1..=4)
            .map(|id| fake::product(id, "Kopi", 10_000.0, 5))
            .collect();
        for p in &mut products {
            p.category = Some("food".to_string());
        }
        let current = products[0].clone();

        let api = MockApi::new().with_products(products);
        let catalog = Catalog::new(api, MemoryStore::new());
        let related = catalog.related(&current).await.unwrap();

        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|p| p.id != current.id));
    }

    #[tokio::test]
    async fn product_without_category_has_no_related() {
        let api = MockApi::new();
        let catalog = Catalog::new(api.clone(), MemoryStore::new());
        let product = fake::product(1, "Kopi", 10_000.0, 5);
        assert!(catalog.related(&product).await.unwrap().is_empty());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn add_to_cart_guards_stock_locally() {
        let api = MockApi::new();
        let store = MemoryStore::with_session(&Session::new("tok", fake::buyer()));
        let catalog = Catalog::new(api.clone(), store);

        let sold_out = fake::product(1, "Kopi", 10_000.0, 0);
        assert!(catalog.add_to_cart(&sold_out, 1).await.is_err());

        let in_stock = fake::product(2, "Teh", 5_000.0, 3);
        assert!(catalog.add_to_cart(&in_stock, 0).await.is_err());
        assert!(catalog.add_to_cart(&in_stock, 4).await.is_err());
        assert!(api.calls().is_empty());

        catalog.add_to_cart(&in_stock, 3).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![ApiCall::AddCartItem { product_id: 2, quantity: 3 }]
        );
    }

    #[tokio::test]
    async fn non_seller_is_refused_locally() {
        let api = MockApi::new();
        let store = MemoryStore::with_session(&Session::new("tok", fake::buyer()));
        let dashboard = SellerDashboard::new(api.clone(), store, AlwaysConfirm);

        let err = dashboard.my_products().await.unwrap_err();
        assert!(matches!(err, TokokuError::Forbidden(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn create_preflight_mirrors_backend_rules() {
        let api = MockApi::new();
        let dashboard = SellerDashboard::new(api.clone(), seller_store(), AlwaysConfirm);

        let mut product = fake::new_product("Kopi", 0.0, 5);
        assert!(dashboard.create(product.clone()).await.is_err());

        product.price = 10_000.0;
        product.stock = -1;
        assert!(dashboard.create(product).await.is_err());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let api = MockApi::new();
        let dashboard = SellerDashboard::new(api.clone(), seller_store(), |_: &str| false);

        let deleted = dashboard.delete(7, "Kopi").await.unwrap();
        assert!(!deleted);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn dashboard_stats_aggregate() {
        let products = vec![
            fake::product(1, "Kopi", 10_000.0, 5),
            fake::product(2, "Teh", 5_000.0, 2),
        ];
        let stats = DashboardStats::from_products(&products);
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.total_stock, 7);
        assert_eq!(stats.total_value, 60_000.0);
    }
}
