//! View models backing the screens.

mod account_view_model;

pub use account_view_model::{AccountState, AccountViewModel};
