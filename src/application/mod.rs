//! Application layer with view models, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;
/// View models.
pub mod view_models;

pub use dto::LoginResponse;
pub use services::SearchHistory;
pub use use_cases::LoginUseCase;
pub use view_models::{AccountState, AccountViewModel};
