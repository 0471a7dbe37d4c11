//! Account view model.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::errors::DataError;
use crate::domain::observable::{Observable, Subscription};
use crate::domain::ports::{AccountDataPort, AccountProfile};

/// Display-ready account properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountState {
    pub first_name: String,
    pub full_name: String,
    pub beer_count: String,
    pub ratings_count: String,
    pub photo_count: String,
    pub avatar_url: Option<String>,
    /// `None` until the first successful fetch.
    pub beer_photo_urls: Option<Vec<String>>,
    pub is_busy: bool,
}

impl AccountState {
    fn from_profile(profile: AccountProfile) -> Self {
        let full_name = format!("{} {}", profile.first_name, profile.last_name)
            .trim()
            .to_string();
        Self {
            first_name: profile.first_name,
            full_name,
            beer_count: profile.beer_count.to_string(),
            ratings_count: profile.rating_count.to_string(),
            photo_count: profile.photo_count.to_string(),
            avatar_url: profile.avatar_url,
            beer_photo_urls: Some(profile.photo_urls),
            is_busy: false,
        }
    }
}

/// Loads the signed-in drinker's profile and publishes it to subscribers.
pub struct AccountViewModel {
    data: Arc<dyn AccountDataPort>,
    state: Observable<AccountState>,
}

impl AccountViewModel {
    #[must_use]
    pub fn new(data: Arc<dyn AccountDataPort>) -> Self {
        Self {
            data,
            state: Observable::default(),
        }
    }

    /// Fetches the profile and publishes the new state.
    /// On failure the previous state is kept and only the busy flag is cleared.
    ///
    /// # Errors
    /// Returns the backend error.
    pub async fn fetch_data(&self, force_refresh: bool) -> Result<(), DataError> {
        debug!(force_refresh, "Fetching account profile");
        self.state.update(|s| s.is_busy = true);

        match self.data.fetch_profile(force_refresh).await {
            Ok(profile) => {
                debug!(photos = profile.photo_urls.len(), "Account profile loaded");
                self.state.set(AccountState::from_profile(profile));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch account profile");
                self.state.update(|s| s.is_busy = false);
                Err(e)
            }
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AccountState {
        self.state.get()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<AccountState> {
        self.state.subscribe()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.subscriber_count()
    }
}
