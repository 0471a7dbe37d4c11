//! Domain error types.

mod data_error;
mod fetch_error;
mod login_error;

pub use data_error::DataError;
pub use fetch_error::FetchError;
pub use login_error::LoginError;
