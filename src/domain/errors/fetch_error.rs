//! Image fetch error types.

use thiserror::Error;

/// Failure of a single image fetch. Never retried by the fetcher.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("malformed payload: {message}")]
    Payload { message: String },

    #[error("decode error: {message}")]
    Decode { message: String },
}

impl FetchError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates malformed payload error.
    #[must_use]
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns whether a later attempt could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
