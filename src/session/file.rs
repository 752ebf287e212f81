//! File-backed client state.
//!
//! One JSON document on disk, re-read on every access so concurrent flows
//! always observe the latest persisted state. This is the production
//! equivalent of the browser's persistent storage.

use super::{Session, SessionStore, StoredState};
use crate::error::{Result, TokokuError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Client-state store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the given path. The file is created lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_state(&self) -> Result<StoredState> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                TokokuError::storage(format!("corrupt state file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoredState::default()),
            Err(e) => Err(TokokuError::storage(format!(
                "cannot read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write_state(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    TokokuError::storage(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| TokokuError::storage(e.to_string()))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            TokokuError::storage(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load_session(&self) -> Result<Option<Session>> {
        Ok(self.read_state().await?.session())
    }

    async fn save_session(&self, session: &Session) -> Result<()> {
        let mut state = self.read_state().await?;
        state.set_session(session);
        self.write_state(&state).await
    }

    async fn clear_session(&self) -> Result<()> {
        let mut state = self.read_state().await?;
        state.clear_session();
        self.write_state(&state).await
    }

    async fn payment_deadline(&self, order_id: i64) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .read_state()
            .await?
            .payment_deadlines
            .get(&order_id)
            .copied())
    }

    async fn save_payment_deadline(&self, order_id: i64, deadline: DateTime<Utc>) -> Result<()> {
        let mut state = self.read_state().await?;
        state.payment_deadlines.insert(order_id, deadline);
        self.write_state(&state).await
    }

    async fn clear_payment_deadline(&self, order_id: i64) -> Result<()> {
        let mut state = self.read_state().await?;
        state.payment_deadlines.remove(&order_id);
        self.write_state(&state).await
    }
}
