//! Localized display strings (English).

pub const TABS_MY_BEERS: &str = "My Beers";
pub const TABS_WISH_LIST: &str = "Wish List";
pub const TABS_SEARCH: &str = "Search";
pub const TABS_PROFILE: &str = "Profile";

pub const WELCOME_TITLE: &str = "Welcome to BeerDrinkin";
pub const WELCOME_PROMISE: &str = "Track the beers you love and discover new ones.";
pub const WELCOME_FACEBOOK_BUTTON: &str = "Connect with Facebook";
pub const WELCOME_AUTH_ERROR: &str = "We couldn't sign you in. Please try again.";

pub const SEARCH_TITLE: &str = "Discover";
pub const SEARCHING: &str = "Searching";

/// Asset shown while the avatar downloads or when the account has none.
pub const AVATAR_PLACEHOLDER: &str = "BeerDrinkin.png";
