//! Main tab shell shown after login.

use std::sync::Arc;

use tracing::trace;

use crate::domain::session::Session;
use crate::presentation::strings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    MyBeers,
    WishList,
    Search,
    Profile,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::MyBeers, Self::WishList, Self::Search, Self::Profile];
}

pub struct TabShell {
    session: Arc<Session>,
    selected: Tab,
}

impl TabShell {
    #[must_use]
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            selected: Tab::default(),
        }
    }

    /// Title of `tab`. The profile tab shows the signed-in drinker's first name.
    #[must_use]
    pub fn title(&self, tab: Tab) -> String {
        match tab {
            Tab::MyBeers => strings::TABS_MY_BEERS.to_string(),
            Tab::WishList => strings::TABS_WISH_LIST.to_string(),
            Tab::Search => strings::TABS_SEARCH.to_string(),
            Tab::Profile => self.session.current_account().map_or_else(
                || strings::TABS_PROFILE.to_string(),
                |account| account.first_name().to_string(),
            ),
        }
    }

    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        Tab::ALL.iter().map(|tab| self.title(*tab)).collect()
    }

    /// Switches to `tab`. Returns false if it was already selected.
    pub fn select(&mut self, tab: Tab) -> bool {
        if self.selected == tab {
            return false;
        }
        trace!(from = ?self.selected, to = ?tab, "Switching tab");
        self.selected = tab;
        true
    }

    #[must_use]
    pub const fn selected(&self) -> Tab {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Account;

    #[test]
    fn test_titles_when_signed_out() {
        let shell = TabShell::new(Arc::new(Session::new()));
        assert_eq!(shell.titles(), vec!["My Beers", "Wish List", "Search", "Profile"]);
    }

    #[test]
    fn test_profile_title_is_first_name() {
        let session = Arc::new(Session::new());
        session.sign_in(Account::new("1", "Mike", "James"));
        let shell = TabShell::new(session.clone());
        assert_eq!(shell.title(Tab::Profile), "Mike");

        session.sign_out();
        assert_eq!(shell.title(Tab::Profile), "Profile");
    }

    #[test]
    fn test_select() {
        let mut shell = TabShell::new(Arc::new(Session::new()));
        assert!(!shell.select(Tab::MyBeers));
        assert!(shell.select(Tab::Profile));
        assert_eq!(shell.selected(), Tab::Profile);
        assert!(!shell.select(Tab::Profile));
    }
}
