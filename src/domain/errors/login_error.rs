//! Login error types.

use thiserror::Error;

/// Login error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum LoginError {
    #[error("authentication with {provider} failed: {message}")]
    Provider { provider: String, message: String },

    #[error("login cancelled by user")]
    Cancelled,

    #[error("failed to save user: {message}")]
    SaveFailed { message: String },

    #[error("failed to refresh account: {message}")]
    RefreshFailed { message: String },
}

impl LoginError {
    /// Creates provider error.
    #[must_use]
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates save failed error.
    #[must_use]
    pub fn save_failed(message: impl Into<String>) -> Self {
        Self::SaveFailed {
            message: message.into(),
        }
    }

    /// Creates refresh failed error.
    #[must_use]
    pub fn refresh_failed(message: impl Into<String>) -> Self {
        Self::RefreshFailed {
            message: message.into(),
        }
    }
}
