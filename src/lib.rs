//! Tokoku - a typed client for the Tokoku storefront API
//!
//! Tokoku wraps the storefront's REST backend in per-visit flow controllers:
//! cart management, checkout, order history, and the simulated payment page
//! with its 24-hour window. The backend stays authoritative for every total
//! and every status transition; this crate only owns the client-side state
//! machines and the validation that runs before a request is worth sending.
//!
//! # Features
//!
//! - **Cart**: load, quantity changes, removal and clearing with
//!   confirmation, always reloading server-computed totals
//! - **Checkout**: cart snapshot to order, with the double-submit guard in
//!   the type system
//! - **Orders**: history with denormalized products and per-order payment
//!   eligibility
//! - **Payment**: two orthogonal state machines (countdown, attempt)
//!   composed by a single submission rule
//! - **Auth & catalog**: login/registration, product browsing, seller
//!   product management
//! - **Testing**: a recording mock API and wire-shaped fixtures
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tokoku::{AuthFlow, ConfigBuilder, FileStore, HttpApi};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Initialize logging
//!     tokoku::init_tracing();
//!
//!     let config = ConfigBuilder::new().from_env().build()?;
//!     let api = HttpApi::new(&config.api_base_url);
//!     let store = FileStore::new(&config.state_path);
//!
//!     let auth = AuthFlow::new(api, store);
//!     let session = auth.login("budi", "rahasia").await?;
//!     println!("halo, {}", session.user().display_name());
//!     Ok(())
//! }
//! ```

pub mod api;
mod auth;
mod cart;
mod catalog;
mod checkout;
mod config;
mod confirm;
mod error;
mod orders;
pub mod payment;
pub mod session;
pub mod testing;
pub mod utils;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// Re-exports for public API
pub use api::{ApiError, HttpApi, StorefrontApi};
pub use auth::AuthFlow;
pub use cart::{CartManager, CartMutation, QuantityChange};
pub use catalog::{Catalog, DashboardStats, SellerDashboard};
pub use checkout::{CheckoutFlow, CheckoutReceipt};
pub use config::{Config, ConfigBuilder, PaymentConfig};
pub use confirm::{AlwaysConfirm, Confirm};
pub use error::{Result, TokokuError};
pub use orders::{OrderViewer, PayNow};
pub use payment::{PaymentMethod, PaymentPage, PaymentParams};
pub use session::{FileStore, MemoryStore, Session, SessionStore};

/// Initialize tracing with sensible defaults
///
/// Uses the `RUST_LOG` environment variable for filtering, defaulting to
/// `info` level. Set `TOKOKU_LOG_JSON=true` for JSON logs.
///
/// # Example
///
/// ```rust,no_run
/// #[tokio::main]
/// async fn main() {
///     tokoku::init_tracing();
///     // ... rest of your app
/// }
/// ```
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("TOKOKU_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
