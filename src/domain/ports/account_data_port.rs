//! Account backend port.

use async_trait::async_trait;

use crate::domain::entities::Account;
use crate::domain::errors::DataError;

/// Profile summary shown on the account screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountProfile {
    pub first_name: String,
    pub last_name: String,
    pub beer_count: u32,
    pub rating_count: u32,
    pub photo_count: u32,
    pub avatar_url: Option<String>,
    /// Locators of the drinker's beer photos, in display order.
    pub photo_urls: Vec<String>,
}

/// Port for the account backend.
#[async_trait]
pub trait AccountDataPort: Send + Sync {
    /// Fetches the profile summary. `force_refresh` bypasses any backend-side cache.
    async fn fetch_profile(&self, force_refresh: bool) -> Result<AccountProfile, DataError>;

    /// Fetches the full account of the authenticated user.
    async fn fetch_account(&self) -> Result<Account, DataError>;
}
