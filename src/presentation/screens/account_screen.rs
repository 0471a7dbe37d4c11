//! Profile tab: account summary and photo grid.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::view_models::{AccountState, AccountViewModel};
use crate::domain::observable::Subscription;
use crate::domain::ports::AnalyticsPort;
use crate::presentation::grid::{PhotoGrid, RefreshOutcome};
use crate::presentation::navigation::Navigation;
use crate::presentation::strings;

/// Scroll offset past which a pull triggers a forced refresh.
const PULL_TO_REFRESH_OFFSET: f64 = -5.0;
/// Header moves at a third of the scroll speed.
const PARALLAX_FACTOR: f64 = 3.0;

/// Avatar image binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarView {
    pub url: Option<String>,
    pub placeholder: &'static str,
}

/// Snapshot of everything the profile tab displays.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountView {
    pub title: String,
    pub full_name: String,
    pub beer_count: String,
    pub ratings_count: String,
    pub photo_count: String,
    /// `None` while an avatar refresh is already running.
    pub avatar: Option<AvatarView>,
    pub placeholder_visible: bool,
    /// `None` until photo urls are known.
    pub photos: Option<RefreshOutcome>,
}

/// Effect of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEffect {
    pub parallax_offset: f64,
    pub refreshed: bool,
}

/// Profile tab controller.
pub struct AccountScreen {
    view_model: Arc<AccountViewModel>,
    analytics: Arc<dyn AnalyticsPort>,
    tracking_enabled: bool,
    grid: PhotoGrid,
    subscription: Option<Subscription<AccountState>>,
    first_appearance: bool,
    avatar_busy: bool,
}

impl AccountScreen {
    #[must_use]
    pub fn new(
        view_model: Arc<AccountViewModel>,
        grid: PhotoGrid,
        analytics: Arc<dyn AnalyticsPort>,
    ) -> Self {
        Self {
            view_model,
            analytics,
            tracking_enabled: false,
            grid,
            subscription: None,
            first_appearance: true,
            avatar_busy: false,
        }
    }

    #[must_use]
    pub const fn with_tracking(mut self, enabled: bool) -> Self {
        self.tracking_enabled = enabled;
        self
    }

    /// Subscribes to the view model and starts the first fetch.
    pub async fn on_load(&mut self) {
        if self.tracking_enabled {
            self.analytics.track("Loaded AccountView", "AccountScreen");
        }
        self.subscription = Some(self.view_model.subscribe());
        self.fetch(false).await;
    }

    /// Refetches on every appearance. Returns true the first time, when the
    /// avatar pop animation should play.
    pub async fn on_appear(&mut self) -> bool {
        self.fetch(false).await;
        let pop = std::mem::replace(&mut self.first_appearance, false);
        if pop {
            self.avatar_busy = true;
        }
        pop
    }

    /// Called when the avatar pop animation ends.
    pub fn finish_avatar_pop(&mut self) {
        self.avatar_busy = false;
    }

    /// Applies parallax and pull-to-refresh for a vertical scroll offset.
    pub async fn on_scroll(&mut self, offset_y: f64) -> ScrollEffect {
        let refreshed = offset_y < PULL_TO_REFRESH_OFFSET;
        if refreshed {
            self.fetch(true).await;
        }
        ScrollEffect {
            parallax_offset: offset_y / PARALLAX_FACTOR,
            refreshed,
        }
    }

    /// Waits for the next state change and re-renders.
    /// Returns `None` once unsubscribed or the view model is gone.
    pub async fn next_change(&mut self) -> Option<AccountView> {
        self.subscription.as_mut()?.changed().await?;
        Some(self.refresh_ui().await)
    }

    /// Builds the view from the current state and rebinds the photo grid.
    pub async fn refresh_ui(&mut self) -> AccountView {
        let state = self
            .subscription
            .as_mut()
            .map_or_else(|| self.view_model.state(), Subscription::latest);

        let avatar = self.refresh_avatar(&state);
        let (placeholder_visible, photos) = match &state.beer_photo_urls {
            Some(urls) => (urls.is_empty(), Some(self.grid.refresh(urls).await)),
            None => (true, None),
        };

        AccountView {
            title: state.first_name,
            full_name: state.full_name,
            beer_count: state.beer_count,
            ratings_count: state.ratings_count,
            photo_count: state.photo_count,
            avatar,
            placeholder_visible,
            photos,
        }
    }

    fn refresh_avatar(&self, state: &AccountState) -> Option<AvatarView> {
        if self.avatar_busy {
            debug!("Avatar busy, skipping refresh");
            return None;
        }
        Some(AvatarView {
            url: state.avatar_url.clone(),
            placeholder: strings::AVATAR_PLACEHOLDER,
        })
    }

    #[must_use]
    pub const fn settings_tapped(&self) -> Navigation {
        Navigation::AccountSettings
    }

    #[must_use]
    pub const fn grid(&self) -> &PhotoGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PhotoGrid {
        &mut self.grid
    }

    /// Drops the state subscription.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    async fn fetch(&self, force_refresh: bool) {
        if let Err(e) = self.view_model.fetch_data(force_refresh).await {
            warn!(error = %e, force_refresh, "Account refresh failed");
        }
    }
}
