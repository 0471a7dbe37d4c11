//! Login DTOs.

use crate::domain::entities::Account;
use crate::domain::ports::AuthProvider;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Account now held by the session.
    pub account: Account,
    /// Provider the user authenticated with.
    pub provider: AuthProvider,
    /// Whether analytics traits were sent.
    pub identified: bool,
}
