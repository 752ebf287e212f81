use crate::api::ApiError;

/// The main error type for Tokoku client operations.
///
/// Variants follow the failure taxonomy of the storefront flows: validation
/// errors are caught before any network call, API errors carry whatever the
/// backend (or the transport) reported, and `Unauthenticated` is kept
/// distinct so front-ends can send the user to the login page instead of
/// showing a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum TokokuError {
    /// Input rejected locally, before any request was issued.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The backend rejected the call, or the transport failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No valid session: token or stored profile is missing.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The authenticated user is not allowed to perform this operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Reading or writing the persisted client state failed.
    #[error("Client state storage error: {0}")]
    Storage(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl TokokuError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error was produced locally, without contacting the backend.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Unauthenticated | Self::Forbidden(_) | Self::Config(_)
        )
    }

    /// The backend's human-readable rejection detail, if there is one.
    #[must_use]
    pub fn rejection_detail(&self) -> Option<&str> {
        match self {
            Self::Api(ApiError::Rejected { detail, .. }) => Some(detail),
            _ => None,
        }
    }
}

/// Convenience result type for Tokoku operations.
pub type Result<T> = std::result::Result<T, TokokuError>;
