//! API boundary error types.
//!
//! Distinguishes backend rejections (which carry a human-readable `detail`
//! meant to be shown verbatim) from transport failures and unparsable
//! responses, which only ever surface as a generic message.

use std::fmt;

/// Errors produced at the storefront API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success status and a detail message.
    Rejected {
        /// HTTP status code of the response.
        status: u16,
        /// Human-readable detail from the response body, shown to the user verbatim.
        detail: String,
    },

    /// The request never completed: connection failure, DNS error, timeout.
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The response arrived but its body could not be decoded.
    InvalidResponse {
        /// Description of the decoding failure.
        message: String,
    },
}

impl ApiError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Whether the backend explicitly rejected the call.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The HTTP status of a rejection, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { status, detail } => {
                write!(f, "Request rejected ({}): {}", status, detail)
            }
            Self::Transport { message } => write!(f, "Transport error: {}", message),
            Self::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_carries_status_and_detail() {
        let err = ApiError::Rejected {
            status: 404,
            detail: "Order tidak ditemukan".to_string(),
        };
        assert!(err.is_rejection());
        assert_eq!(err.status(), Some(404));
        assert_eq!(
            err.to_string(),
            "Request rejected (404): Order tidak ditemukan"
        );
    }

    #[test]
    fn transport_errors_are_not_rejections() {
        let err = ApiError::transport("connection refused");
        assert!(!err.is_rejection());
        assert_eq!(err.status(), None);
    }
}
