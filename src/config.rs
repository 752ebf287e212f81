use crate::error::{Result, TokokuError};
use crate::utils::get_env_with_prefix;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL for local development.
const DEFAULT_API_URL: &str = "http://localhost:8000";
/// File name of the persisted client state.
const STATE_FILE: &str = "state.json";
/// Payment window length: 24 hours.
const DEFAULT_PAYMENT_WINDOW_SECS: u64 = 24 * 60 * 60;
/// Simulated payment processing delay.
const DEFAULT_PROCESSING_DELAY_MS: u64 = 2_000;

/// Main configuration for the Tokoku client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the storefront backend, without a trailing slash.
    pub api_base_url: String,
    /// Path of the persisted client-state file.
    pub state_path: PathBuf,
    /// Payment page knobs.
    pub payment: PaymentConfig,
}

/// Payment page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Length of the payment window opened for a pending order.
    #[serde(with = "duration_secs")]
    pub window: Duration,
    /// Simulated processing delay before the pay call is issued.
    #[serde(with = "duration_millis")]
    pub processing_delay: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(DEFAULT_PAYMENT_WINDOW_SECS),
            processing_delay: Duration::from_millis(DEFAULT_PROCESSING_DELAY_MS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            state_path: default_state_path(),
            payment: PaymentConfig::default(),
        }
    }
}

impl Config {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

fn default_state_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".tokoku").join(STATE_FILE),
        None => PathBuf::from(".tokoku").join(STATE_FILE),
    }
}

/// Builder for [`Config`].
///
/// # Example
///
/// ```rust
/// use tokoku::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_api_url("http://localhost:8000")
///     .from_env()
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    api_base_url: Option<String>,
    state_path: Option<PathBuf>,
    payment: PaymentConfig,
}

impl ConfigBuilder {
    /// Create a builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Set the client-state file path.
    #[must_use]
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    /// Set the payment window length.
    #[must_use]
    pub fn with_payment_window(mut self, window: Duration) -> Self {
        self.payment.window = window;
        self
    }

    /// Set the simulated processing delay.
    #[must_use]
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.payment.processing_delay = delay;
        self
    }

    /// Overlay values from the environment.
    ///
    /// Reads `TOKOKU_API_URL` (falling back to `API_URL`) and
    /// `TOKOKU_STATE_PATH` (falling back to `STATE_PATH`). Explicitly-set
    /// builder values win over the environment.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.api_base_url.is_none() {
            self.api_base_url = get_env_with_prefix("API_URL");
        }
        if self.state_path.is_none() {
            self.state_path = get_env_with_prefix("STATE_PATH").map(PathBuf::from);
        }
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the API base URL does not parse as
    /// an absolute `http`/`https` URL.
    pub fn build(self) -> Result<Config> {
        let api_base_url = self
            .api_base_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let parsed = url::Url::parse(&api_base_url)
            .map_err(|e| TokokuError::config(format!("invalid API URL '{}': {}", api_base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TokokuError::config(format!(
                "API URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        Ok(Config {
            api_base_url,
            state_path: self.state_path.unwrap_or_else(default_state_path),
            payment: self.payment,
        })
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
