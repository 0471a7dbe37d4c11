//! Signed-in session state.

use tracing::info;

use super::entities::Account;
use super::observable::{Observable, Subscription};

/// The current login session.
///
/// Created once by the composition root and shared by `Arc` with every screen
/// that needs the account. Its contents follow login and logout.
#[derive(Debug, Default)]
pub struct Session {
    account: Observable<Option<Account>>,
}

impl Session {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `account` as signed in, replacing any previous account.
    pub fn sign_in(&self, account: Account) {
        info!(account_id = %account.id(), "Signed in");
        self.account.set(Some(account));
    }

    /// Clears the signed-in account.
    pub fn sign_out(&self) {
        if self.is_signed_in() {
            info!("Signed out");
        }
        self.account.set(None);
    }

    #[must_use]
    pub fn current_account(&self) -> Option<Account> {
        self.account.get()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.account.get().is_some()
    }

    /// Subscribes to login and logout.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<Option<Account>> {
        self.account.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let session = Session::new();
        let mut sub = session.subscribe();
        assert!(!session.is_signed_in());

        session.sign_in(Account::new("1", "Mike", "James"));
        let seen = sub.changed().await.flatten();
        assert_eq!(seen.map(|a| a.first_name().to_string()).as_deref(), Some("Mike"));

        session.sign_out();
        assert_eq!(sub.changed().await, Some(None));
        assert!(session.current_account().is_none());
    }
}
