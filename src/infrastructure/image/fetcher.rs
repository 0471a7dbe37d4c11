//! HTTP image fetcher for the photo backend.
//!
//! The backend answers an image GET with a text body holding the base64 of
//! the image bytes, not with a binary image response.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tracing::debug;

use crate::domain::entities::ImageData;
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetcherPort;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches base64 text payloads over HTTP and decodes them into images.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the given request timeout.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("beerdrinkin/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::network(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    async fn download_text(&self, locator: &str) -> Result<String, FetchError> {
        let response = self
            .http_client
            .get(locator)
            .send()
            .await
            .map_err(|e| FetchError::network(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(FetchError::network(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::network(format!("Failed to read body: {e}")))
    }
}

/// Decodes a base64 text payload into raw image bytes.
///
/// Surrounding whitespace, line breaks and a JSON-style pair of quotes are
/// tolerated.
///
/// # Errors
/// Returns [`FetchError::Payload`] if the body is empty or not valid base64.
pub fn decode_payload(body: &str) -> Result<Bytes, FetchError> {
    let trimmed = body.trim().trim_matches('"');
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(FetchError::payload("empty body"));
    }
    STANDARD
        .decode(compact.as_bytes())
        .map(Bytes::from)
        .map_err(|e| FetchError::payload(format!("invalid base64: {e}")))
}

#[async_trait::async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, locator: &str) -> Result<ImageData, FetchError> {
        debug!(url = %locator, "Downloading image from network");
        let body = self.download_text(locator).await?;
        let bytes = decode_payload(&body)?;

        let data = tokio::task::spawn_blocking(move || ImageData::decode(bytes))
            .await
            .map_err(|e| FetchError::decode(format!("Decode task panicked: {e}")))?
            .map_err(|e| FetchError::decode(format!("Failed to decode image: {e}")))?;

        debug!(url = %locator, width = data.width(), height = data.height(), "Image downloaded");
        Ok(data)
    }
}
