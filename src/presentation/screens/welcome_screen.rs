//! Welcome screen with the social login button.

use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::application::use_cases::LoginUseCase;
use crate::domain::ports::{AnalyticsPort, AuthProvider};
use crate::presentation::navigation::Navigation;
use crate::presentation::strings;

const TIME_ON_SCREEN_EVENT: &str = "Time spent on welcome screen";

/// Static labels of the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WelcomeView {
    pub title: &'static str,
    pub promise: &'static str,
    pub facebook_button: &'static str,
}

/// What the host should do after the connect button was tapped.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectOutcome {
    Navigate(Navigation),
    ShowError(&'static str),
}

pub struct WelcomeScreen {
    login: LoginUseCase,
    analytics: Arc<dyn AnalyticsPort>,
    tracking_enabled: bool,
    shown_at: Option<Instant>,
}

impl WelcomeScreen {
    #[must_use]
    pub const fn new(login: LoginUseCase, analytics: Arc<dyn AnalyticsPort>) -> Self {
        Self {
            login,
            analytics,
            tracking_enabled: false,
            shown_at: None,
        }
    }

    /// Enables the time-on-screen report.
    #[must_use]
    pub const fn with_tracking(mut self, enabled: bool) -> Self {
        self.tracking_enabled = enabled;
        self
    }

    /// Starts the time-on-screen timer and returns the labels.
    pub fn on_load(&mut self) -> WelcomeView {
        self.shown_at = Some(Instant::now());
        WelcomeView {
            title: strings::WELCOME_TITLE,
            promise: strings::WELCOME_PROMISE,
            facebook_button: strings::WELCOME_FACEBOOK_BUTTON,
        }
    }

    /// Stops the timer. Only the first call after a load reports.
    pub fn on_disappear(&mut self) {
        if let Some(started) = self.shown_at.take()
            && self.tracking_enabled
        {
            self.analytics
                .track_time(TIME_ON_SCREEN_EVENT, started.elapsed());
        }
    }

    /// Runs the Facebook login.
    pub async fn connect(&self) -> ConnectOutcome {
        match self.login.execute(AuthProvider::Facebook).await {
            Ok(_) => ConnectOutcome::Navigate(Navigation::TabShell),
            Err(e) => {
                warn!(error = %e, "Login failed");
                ConnectOutcome::ShowError(strings::WELCOME_AUTH_ERROR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Account;
    use crate::domain::ports::AccountProfile;
    use crate::domain::ports::mocks::{
        MockAccountData, MockAnalyticsPort, MockAuthProvider, MockUserStore,
    };
    use crate::domain::session::Session;

    fn screen(
        login_succeeds: bool,
        tracking: bool,
        analytics: MockAnalyticsPort,
    ) -> (WelcomeScreen, Arc<Session>) {
        let analytics: Arc<dyn AnalyticsPort> = Arc::new(analytics);
        let session = Arc::new(Session::new());
        let login = LoginUseCase::new(
            Arc::new(MockAuthProvider::new(login_succeeds)),
            Arc::new(MockUserStore::new()),
            Arc::new(MockAccountData::new(
                AccountProfile::default(),
                Account::new("1", "Mike", "James"),
            )),
            analytics.clone(),
            session.clone(),
        );
        (
            WelcomeScreen::new(login, analytics).with_tracking(tracking),
            session,
        )
    }

    #[test]
    fn test_labels_are_localized() {
        let (mut screen, _) = screen(true, false, MockAnalyticsPort::new());
        let view = screen.on_load();
        assert_eq!(view.title, strings::WELCOME_TITLE);
        assert_eq!(view.facebook_button, strings::WELCOME_FACEBOOK_BUTTON);
    }

    #[test]
    fn test_time_on_screen_reported_once() {
        let mut analytics = MockAnalyticsPort::new();
        analytics
            .expect_track_time()
            .withf(|name, _| name == TIME_ON_SCREEN_EVENT)
            .times(1)
            .return_const(());
        let (mut screen, _) = screen(true, true, analytics);

        screen.on_load();
        screen.on_disappear();
        screen.on_disappear();
    }

    #[test]
    fn test_disappear_without_load_reports_nothing() {
        let mut analytics = MockAnalyticsPort::new();
        analytics.expect_track_time().never();
        let (mut screen, _) = screen(true, true, analytics);
        screen.on_disappear();
    }

    #[tokio::test]
    async fn test_connect_success_navigates() {
        let (screen, session) = screen(true, false, MockAnalyticsPort::new());
        assert_eq!(
            screen.connect().await,
            ConnectOutcome::Navigate(Navigation::TabShell)
        );
        assert!(session.is_signed_in());
    }

    #[tokio::test]
    async fn test_connect_failure_shows_error() {
        let (screen, session) = screen(false, false, MockAnalyticsPort::new());
        assert_eq!(
            screen.connect().await,
            ConnectOutcome::ShowError(strings::WELCOME_AUTH_ERROR)
        );
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_time_on_screen_not_reported_when_tracking_disabled() {
        let mut analytics = MockAnalyticsPort::new();
        analytics.expect_track_time().never();
        let (mut screen, _) = screen(true, false, analytics);

        screen.on_load();
        screen.on_disappear();
    }
}
