//! Domain layer with core entities, session state and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Observable values.
pub mod observable;
/// Port definitions.
pub mod ports;
/// Login session.
pub mod session;

pub use entities::{Account, BeerItem, ImageData, ImageKey, ImageSource, IndexedBeer};
pub use errors::{DataError, FetchError, LoginError};
pub use observable::{Observable, Subscription};
pub use session::Session;
