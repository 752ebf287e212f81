//! In-memory client state.
//!
//! Suitable for tests and short-lived tools; everything is lost on drop.

use super::{Session, SessionStore, StoredState};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Client-state store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<StoredState>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a session.
    #[must_use]
    pub fn with_session(session: &Session) -> Self {
        let mut state = StoredState::default();
        state.set_session(session);
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load_session(&self) -> Result<Option<Session>> {
        Ok(self.state.read().await.session())
    }

    async fn save_session(&self, session: &Session) -> Result<()> {
        self.state.write().await.set_session(session);
        Ok(())
    }

    async fn clear_session(&self) -> Result<()> {
        self.state.write().await.clear_session();
        Ok(())
    }

    async fn payment_deadline(&self, order_id: i64) -> Result<Option<DateTime<Utc>>> {
        Ok(self.state.read().await.payment_deadlines.get(&order_id).copied())
    }

    async fn save_payment_deadline(&self, order_id: i64, deadline: DateTime<Utc>) -> Result<()> {
        self.state
            .write()
            .await
            .payment_deadlines
            .insert(order_id, deadline);
        Ok(())
    }

    async fn clear_payment_deadline(&self, order_id: i64) -> Result<()> {
        self.state.write().await.payment_deadlines.remove(&order_id);
        Ok(())
    }
}
