mod account_screen;
mod search_screen;
mod tab_shell;
mod welcome_screen;

pub use account_screen::{AccountScreen, AccountView, AvatarView, ScrollEffect};
pub use search_screen::SearchScreen;
pub use tab_shell::{Tab, TabShell};
pub use welcome_screen::{ConnectOutcome, WelcomeScreen, WelcomeView};
