//! Shared command context: configuration, API client, client-state store.

use anyhow::{Context, Result};
use tokoku::{Config, ConfigBuilder, FileStore, HttpApi};

/// Everything a command needs to build its flow controller.
pub struct AppContext {
    pub config: Config,
    pub api: HttpApi,
    pub store: FileStore,
}

impl AppContext {
    /// Build the context from the environment (`TOKOKU_API_URL`,
    /// `TOKOKU_STATE_PATH`) with local-development defaults.
    pub fn from_env() -> Result<Self> {
        let config = ConfigBuilder::new()
            .from_env()
            .build()
            .context("invalid configuration")?;
        let api = HttpApi::new(&config.api_base_url);
        let store = FileStore::new(&config.state_path);
        Ok(Self { config, api, store })
    }
}
