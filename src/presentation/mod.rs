//! Presentation layer: screens, the photo grid and navigation.

/// Photo grid and image provisioning.
pub mod grid;
/// Navigation requests.
pub mod navigation;
/// Screen controllers.
pub mod screens;
/// Localized strings.
pub mod strings;

pub use grid::{GridImageProvider, PhotoGrid};
pub use navigation::Navigation;
