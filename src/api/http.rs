//! Live HTTP implementation of the storefront API.
//!
//! One `reqwest::Client` per instance, built at construction. Calls are not
//! retried and carry no client-side timeout beyond the transport defaults:
//! recovery is always an explicit user re-action in the flows above.

use super::error::ApiError;
use super::types::{
    AddCartItem, AuthToken, Cart, CartItem, Credentials, NewOrder, NewProduct, Order,
    OrderExtended, PayOrder, PaymentConfirmation, Product, ProductPatch, RegisterUser,
    UpdateCartItem, UserProfile,
};
use super::{ApiResult, StorefrontApi};
use crate::session::Session;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;

/// Live storefront API client.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the given API base URL.
    ///
    /// The base URL is expected to be validated already (see
    /// [`crate::config::ConfigBuilder::build`]); a trailing slash is stripped
    /// so endpoint paths can always start with `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Self::build_client(),
            base_url,
        }
    }

    fn build_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent(concat!("tokoku/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder, session: &Session) -> reqwest::RequestBuilder {
        request.bearer_auth(session.token().expose_secret())
    }
}

/// Turn a response into a decoded body or an [`ApiError`].
///
/// Non-success responses are mined for the backend's `detail` field, which is
/// shown to the user verbatim. A non-success response without a decodable
/// body is reported as `InvalidResponse` (transport class), matching the
/// generic-message handling of unparsable replies.
async fn decode<T: DeserializeOwned>(op: &str, response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|e| {
            tracing::warn!(target: "tokoku::api", operation = op, error = %e, "response body did not decode");
            ApiError::invalid_response(e.to_string())
        });
    }

    let detail = match response.json::<serde_json::Value>().await {
        Ok(body) => match body.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        Err(e) => {
            return Err(ApiError::invalid_response(format!(
                "{} response had no readable body: {}",
                status.as_u16(),
                e
            )));
        }
    };

    tracing::debug!(
        target: "tokoku::api",
        operation = op,
        status = status.as_u16(),
        detail = %detail,
        "backend rejected request"
    );
    Err(ApiError::Rejected {
        status: status.as_u16(),
        detail,
    })
}

/// Like [`decode`], for endpoints whose success body the client ignores.
async fn decode_unit(op: &str, response: reqwest::Response) -> ApiResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    decode::<serde_json::Value>(op, response).await.map(|_| ())
}

#[async_trait]
impl StorefrontApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthToken> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await?;
        decode("login", response).await
    }

    async fn register(&self, user: &RegisterUser) -> ApiResult<UserProfile> {
        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(user)
            .send()
            .await?;
        decode("register", response).await
    }

    async fn list_products(
        &self,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> ApiResult<Vec<Product>> {
        let mut request = self.client.get(self.url("/products/"));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        decode("list_products", request.send().await?).await
    }

    async fn get_product(&self, product_id: i64) -> ApiResult<Product> {
        let response = self
            .client
            .get(self.url(&format!("/products/{}", product_id)))
            .send()
            .await?;
        decode("get_product", response).await
    }

    async fn fetch_cart(&self, session: &Session) -> ApiResult<Cart> {
        let request = self.authed(self.client.get(self.url("/cart/")), session);
        decode("fetch_cart", request.send().await?).await
    }

    async fn add_cart_item(&self, session: &Session, item: &AddCartItem) -> ApiResult<CartItem> {
        let request = self
            .authed(self.client.post(self.url("/cart/")), session)
            .json(item);
        decode("add_cart_item", request.send().await?).await
    }

    async fn update_cart_item(
        &self,
        session: &Session,
        item_id: i64,
        update: &UpdateCartItem,
    ) -> ApiResult<CartItem> {
        let request = self
            .authed(
                self.client.put(self.url(&format!("/cart/{}", item_id))),
                session,
            )
            .json(update);
        decode("update_cart_item", request.send().await?).await
    }

    async fn remove_cart_item(&self, session: &Session, item_id: i64) -> ApiResult<()> {
        let request = self.authed(
            self.client.delete(self.url(&format!("/cart/{}", item_id))),
            session,
        );
        decode_unit("remove_cart_item", request.send().await?).await
    }

    async fn clear_cart(&self, session: &Session) -> ApiResult<()> {
        let request = self.authed(self.client.delete(self.url("/cart/")), session);
        decode_unit("clear_cart", request.send().await?).await
    }

    async fn create_order(&self, session: &Session, order: &NewOrder) -> ApiResult<Order> {
        let request = self
            .authed(self.client.post(self.url("/orders/")), session)
            .json(order);
        decode("create_order", request.send().await?).await
    }

    async fn list_orders(&self, session: &Session) -> ApiResult<Vec<OrderExtended>> {
        let request = self.authed(self.client.get(self.url("/orders/extended/all")), session);
        decode("list_orders", request.send().await?).await
    }

    async fn pay_order(
        &self,
        session: &Session,
        order_id: i64,
        payment: &PayOrder,
    ) -> ApiResult<PaymentConfirmation> {
        let request = self
            .authed(
                self.client
                    .post(self.url(&format!("/orders/{}/pay", order_id))),
                session,
            )
            .json(payment);
        decode("pay_order", request.send().await?).await
    }

    async fn my_products(&self, session: &Session) -> ApiResult<Vec<Product>> {
        let request = self.authed(self.client.get(self.url("/products/my/products")), session);
        decode("my_products", request.send().await?).await
    }

    async fn create_product(&self, session: &Session, product: &NewProduct) -> ApiResult<Product> {
        let request = self
            .authed(self.client.post(self.url("/products/")), session)
            .json(product);
        decode("create_product", request.send().await?).await
    }

    async fn update_product(
        &self,
        session: &Session,
        product_id: i64,
        patch: &ProductPatch,
    ) -> ApiResult<Product> {
        let request = self
            .authed(
                self.client.put(self.url(&format!("/products/{}", product_id))),
                session,
            )
            .json(patch);
        decode("update_product", request.send().await?).await
    }

    async fn delete_product(&self, session: &Session, product_id: i64) -> ApiResult<()> {
        let request = self.authed(
            self.client.delete(self.url(&format!("/products/{}", product_id))),
            session,
        );
        decode_unit("delete_product", request.send().await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let api = HttpApi::new("http://localhost:8000/");
        assert_eq!(api.url("/cart/"), "http://localhost:8000/cart/");
    }

    #[test]
    fn nested_base_path_is_preserved() {
        let api = HttpApi::new("https://toko.example.com/api");
        assert_eq!(
            api.url("/orders/extended/all"),
            "https://toko.example.com/api/orders/extended/all"
        );
    }
}
