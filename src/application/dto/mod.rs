//! Data transfer objects.

mod login_dto;

pub use login_dto::LoginResponse;
