//! Domain entity definitions.

mod account;
mod beer;
pub(crate) mod image;

pub use account::Account;
pub use beer::{BeerItem, IndexedBeer};
pub use self::image::{ImageData, ImageKey, ImageSource};
