//! Navigation requests emitted by screens.

use crate::domain::entities::BeerItem;

/// Destination a screen asks the host to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// Main tab shell, shown after a successful login.
    TabShell,
    /// Account settings, pushed from the profile tab.
    AccountSettings,
    /// Beer detail page.
    BeerDescription {
        beer: BeerItem,
        enable_check_in: bool,
    },
}
