//! Domain types for image provisioning.

use std::sync::Arc;

use bytes::Bytes;

/// Cache key for a remote image.
/// Derived from a hash of the locator so it is safe to use as a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(String);

impl ImageKey {
    /// Creates an `ImageKey` from a precomputed key string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Resolves the cache key for a remote locator.
    #[must_use]
    pub fn from_locator(locator: &str) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(locator.as_bytes());
        let result = hasher.finalize();
        Self(hex::encode(&result[..16]))
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded image together with the encoded bytes it was decoded from.
///
/// The memory tier keeps the decoded image ready for display; the disk tier
/// persists `bytes`.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Decoded, displayable image.
    pub image: Arc<image::DynamicImage>,
    /// Encoded image bytes (PNG, JPEG, ...).
    pub bytes: Bytes,
}

impl ImageData {
    /// Creates image data from its decoded and encoded forms.
    #[must_use]
    pub fn new(image: image::DynamicImage, bytes: impl Into<Bytes>) -> Self {
        Self {
            image: Arc::new(image),
            bytes: bytes.into(),
        }
    }

    /// Decodes encoded image bytes.
    ///
    /// # Errors
    /// Returns the decoder error if the bytes are not a supported image.
    pub fn decode(bytes: impl Into<Bytes>) -> Result<Self, image::ImageError> {
        let bytes = bytes.into();
        let image = image::load_from_memory(&bytes)?;
        Ok(Self {
            image: Arc::new(image),
            bytes,
        })
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Where an asynchronously loaded image came from.
/// Memory hits are answered synchronously and never produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Promoted from the disk tier.
    DiskCache,
    /// Downloaded from the network.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DiskCache => write!(f, "disk"),
            Self::Network => write!(f, "network"),
        }
    }
}
