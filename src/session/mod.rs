//! Persisted client state: the authenticated session and payment deadlines.
//!
//! The storefront keeps a bearer token and the cached user profile in
//! client-local storage; a session is valid only while both are present.
//! [`SessionStore`] abstracts that storage so flows can run against a file
//! in production and an in-memory store in tests. Stores are re-read on
//! every access — nothing is cached beyond a single operation, and nothing
//! refreshes or invalidates the token; expiry is only ever discovered when
//! the backend rejects a call.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::api::types::UserProfile;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The authenticated user context: bearer token plus cached profile.
///
/// Constructing a `Session` requires both parts, so "token present but
/// profile missing" (or the reverse) is unrepresentable — stores return
/// `None` in that case and the caller treats it as unauthenticated.
#[derive(Debug, Clone)]
pub struct Session {
    token: SecretString,
    user: UserProfile,
}

impl Session {
    /// Create a session from a bearer token and the profile it belongs to.
    #[must_use]
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: SecretString::new(token.into()),
            user,
        }
    }

    /// The bearer credential. Exposed only at the transport boundary.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The cached user profile.
    #[must_use]
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Whether this session belongs to a seller account.
    #[must_use]
    pub fn is_seller(&self) -> bool {
        self.user.is_seller
    }
}

/// Raw persisted shape of the client state.
///
/// `payment_deadlines` keeps the open payment window per order id so a
/// re-opened payment page resumes the same 24-hour window instead of being
/// granted a fresh one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct StoredState {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub payment_deadlines: HashMap<i64, DateTime<Utc>>,
}

impl StoredState {
    pub(crate) fn session(&self) -> Option<Session> {
        match (&self.token, &self.user) {
            (Some(token), Some(user)) => Some(Session::new(token.clone(), user.clone())),
            _ => None,
        }
    }

    pub(crate) fn set_session(&mut self, session: &Session) {
        self.token = Some(session.token().expose_secret().clone());
        self.user = Some(session.user().clone());
    }

    pub(crate) fn clear_session(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Client-state storage trait.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the current session.
    ///
    /// Returns `Ok(None)` when the token or the profile is missing.
    async fn load_session(&self) -> Result<Option<Session>>;

    /// Persist a session (token and profile together).
    async fn save_session(&self, session: &Session) -> Result<()>;

    /// Drop the persisted session. Used by logout.
    async fn clear_session(&self) -> Result<()>;

    /// The stored payment deadline for an order, if one is open.
    async fn payment_deadline(&self, order_id: i64) -> Result<Option<DateTime<Utc>>>;

    /// Record the payment deadline for an order.
    async fn save_payment_deadline(&self, order_id: i64, deadline: DateTime<Utc>) -> Result<()>;

    /// Remove the payment deadline for an order (after success).
    async fn clear_payment_deadline(&self, order_id: i64) -> Result<()>;
}

/// Load the current session or fail as unauthenticated.
///
/// Every authenticated flow starts here; front-ends translate the
/// [`crate::TokokuError::Unauthenticated`] failure into a redirect to login.
pub async fn require_session<S: SessionStore + ?Sized>(store: &S) -> Result<Session> {
    store
        .load_session()
        .await?
        .ok_or(crate::error::TokokuError::Unauthenticated)
}
