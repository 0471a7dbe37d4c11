//! Authentication provider and user store ports.

use async_trait::async_trait;

use crate::domain::errors::LoginError;

/// External identity providers supported on the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Facebook,
}

impl std::fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Facebook => write!(f, "Facebook"),
        }
    }
}

/// Identity returned by a successful provider login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub auth_token: String,
}

/// Port for the hosted authentication service.
#[async_trait]
pub trait AuthProviderPort: Send + Sync {
    /// Runs the provider login flow.
    async fn login(&self, provider: AuthProvider) -> Result<AuthenticatedUser, LoginError>;
}

/// Port persisting the authenticated user locally.
#[async_trait]
pub trait UserStorePort: Send + Sync {
    async fn save_user(&self, user: &AuthenticatedUser) -> Result<(), LoginError>;

    async fn clear_user(&self) -> Result<(), LoginError>;
}
