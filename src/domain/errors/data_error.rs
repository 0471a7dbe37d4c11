//! Backend data error types.

use thiserror::Error;

/// Errors from the account backend and search index.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum DataError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("network error: {message}")]
    Network { message: String },

    #[error("unexpected response: {message}")]
    Unexpected { message: String },
}

impl DataError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}
