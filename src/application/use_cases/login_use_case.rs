//! Login use case implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::application::dto::LoginResponse;
use crate::domain::entities::Account;
use crate::domain::errors::LoginError;
use crate::domain::ports::{AccountDataPort, AnalyticsPort, AuthProvider, AuthProviderPort, UserStorePort};
use crate::domain::session::Session;

/// Handles the welcome-screen login workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthProviderPort>,
    user_store: Arc<dyn UserStorePort>,
    account_data: Arc<dyn AccountDataPort>,
    analytics: Arc<dyn AnalyticsPort>,
    session: Arc<Session>,
    tracking_enabled: bool,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub fn new(
        auth_port: Arc<dyn AuthProviderPort>,
        user_store: Arc<dyn UserStorePort>,
        account_data: Arc<dyn AccountDataPort>,
        analytics: Arc<dyn AnalyticsPort>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            auth_port,
            user_store,
            account_data,
            analytics,
            session,
            tracking_enabled: false,
        }
    }

    /// Enables sending identity traits after login.
    #[must_use]
    pub const fn with_tracking(mut self, enabled: bool) -> Self {
        self.tracking_enabled = enabled;
        self
    }

    /// Logs in with `provider`, saves the user, loads the account and signs
    /// the session in.
    ///
    /// # Errors
    /// Returns error if any step fails; the session is left untouched.
    pub async fn execute(&self, provider: AuthProvider) -> Result<LoginResponse, LoginError> {
        self.execute_on(provider, chrono::Local::now().date_naive())
            .await
    }

    /// Same as [`Self::execute`] with an explicit date for age computation.
    ///
    /// # Errors
    /// Returns error if any step fails; the session is left untouched.
    pub async fn execute_on(
        &self,
        provider: AuthProvider,
        today: NaiveDate,
    ) -> Result<LoginResponse, LoginError> {
        debug!(%provider, "Attempting login");

        let user = self.auth_port.login(provider).await.map_err(|e| {
            warn!(error = %e, "Provider login failed");
            e
        })?;

        self.user_store.save_user(&user).await?;
        debug!(user_id = %user.user_id, "User saved");

        let account = self
            .account_data
            .fetch_account()
            .await
            .map_err(|e| LoginError::refresh_failed(e.to_string()))?;

        self.session.sign_in(account.clone());
        info!(account_id = %account.id(), %provider, "Successfully authenticated");

        let identified = if self.tracking_enabled {
            self.analytics
                .identify(account.id(), &identity_traits(&account, today));
            true
        } else {
            false
        };

        Ok(LoginResponse {
            account,
            provider,
            identified,
        })
    }

    /// Clears the stored user and signs the session out.
    ///
    /// # Errors
    /// Returns error if the stored user cannot be cleared.
    pub async fn logout(&self) -> Result<(), LoginError> {
        self.user_store.clear_user().await?;
        self.session.sign_out();
        Ok(())
    }
}

fn identity_traits(account: &Account, today: NaiveDate) -> BTreeMap<String, String> {
    let mut traits = BTreeMap::new();
    if let Some(email) = account.email() {
        traits.insert("email".to_string(), email.to_string());
    }
    traits.insert("firstName".to_string(), account.first_name().to_string());
    traits.insert("lastName".to_string(), account.last_name().to_string());
    if let Some(age) = account.age_on(today) {
        traits.insert("age".to_string(), age.to_string());
    }
    traits.insert("gender".to_string(), account.gender().to_string());
    traits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DataError;
    use crate::domain::ports::AccountProfile;
    use crate::domain::ports::mocks::{
        MockAccountData, MockAnalyticsPort, MockAuthProvider, MockUserStore,
    };

    fn account() -> Account {
        Account::new("acc-1", "Mike", "James")
            .with_email("mike@example.com")
            .with_date_of_birth(NaiveDate::from_ymd_opt(1990, 6, 1).unwrap())
            .with_is_male(true)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_successful_login_signs_in() {
        let session = Arc::new(Session::new());
        let store = Arc::new(MockUserStore::new());
        let mut analytics = MockAnalyticsPort::new();
        analytics.expect_identify().never();

        let use_case = LoginUseCase::new(
            Arc::new(MockAuthProvider::new(true)),
            store.clone(),
            Arc::new(MockAccountData::new(AccountProfile::default(), account())),
            Arc::new(analytics),
            session.clone(),
        );

        let response = use_case.execute_on(AuthProvider::Facebook, today()).await.unwrap();

        assert_eq!(response.account.first_name(), "Mike");
        assert!(!response.identified);
        assert!(session.is_signed_in());
        assert!(store.saved.lock().is_some());
    }

    #[tokio::test]
    async fn test_tracking_sends_traits() {
        let mut analytics = MockAnalyticsPort::new();
        analytics
            .expect_identify()
            .withf(|id, traits| {
                id == "acc-1"
                    && traits.get("age").map(String::as_str) == Some("30")
                    && traits.get("gender").map(String::as_str) == Some("Male")
                    && traits.get("email").map(String::as_str) == Some("mike@example.com")
            })
            .times(1)
            .return_const(());

        let use_case = LoginUseCase::new(
            Arc::new(MockAuthProvider::new(true)),
            Arc::new(MockUserStore::new()),
            Arc::new(MockAccountData::new(AccountProfile::default(), account())),
            Arc::new(analytics),
            Arc::new(Session::new()),
        )
        .with_tracking(true);

        let response = use_case.execute_on(AuthProvider::Facebook, today()).await.unwrap();
        assert!(response.identified);
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_session_signed_out() {
        let session = Arc::new(Session::new());
        let store = Arc::new(MockUserStore::new());
        let use_case = LoginUseCase::new(
            Arc::new(MockAuthProvider::new(false)),
            store.clone(),
            Arc::new(MockAccountData::new(AccountProfile::default(), account())),
            Arc::new(MockAnalyticsPort::new()),
            session.clone(),
        );

        let result = use_case.execute(AuthProvider::Facebook).await;

        assert!(matches!(result, Err(LoginError::Provider { .. })));
        assert!(!session.is_signed_in());
        assert!(store.saved.lock().is_none());
    }

    #[tokio::test]
    async fn test_account_refresh_failure() {
        let data = Arc::new(MockAccountData::new(AccountProfile::default(), account()));
        data.fail_account(DataError::network("offline"));
        let session = Arc::new(Session::new());
        let use_case = LoginUseCase::new(
            Arc::new(MockAuthProvider::new(true)),
            Arc::new(MockUserStore::new()),
            data,
            Arc::new(MockAnalyticsPort::new()),
            session.clone(),
        );

        let result = use_case.execute_on(AuthProvider::Facebook, today()).await;

        assert!(matches!(result, Err(LoginError::RefreshFailed { .. })));
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let session = Arc::new(Session::new());
        let store = Arc::new(MockUserStore::new());
        let use_case = LoginUseCase::new(
            Arc::new(MockAuthProvider::new(true)),
            store.clone(),
            Arc::new(MockAccountData::new(AccountProfile::default(), account())),
            Arc::new(MockAnalyticsPort::new()),
            session.clone(),
        );
        use_case.execute_on(AuthProvider::Facebook, today()).await.unwrap();

        use_case.logout().await.unwrap();

        assert!(!session.is_signed_in());
        assert!(store.saved.lock().is_none());
    }
}
