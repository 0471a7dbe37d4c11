mod account_data_port;
mod analytics_port;
mod auth_port;
mod image_cache_port;
mod search_index_port;

pub use account_data_port::{AccountDataPort, AccountProfile};
pub use analytics_port::AnalyticsPort;
pub use auth_port::{AuthProvider, AuthProviderPort, AuthenticatedUser, UserStorePort};
pub use image_cache_port::{CacheError, CacheResult, ImageCachePort, ImageFetcherPort};
pub use search_index_port::SearchIndexPort;
