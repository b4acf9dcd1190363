//! Async icon loading: memory cache first, then network.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::entities::ImageId;
use crate::domain::ports::{CacheError, CacheResult, ImageCachePort};

/// Message sent when a prefetched icon finishes loading.
#[derive(Debug, Clone)]
pub struct IconLoadedEvent {
    /// URL that was requested.
    pub url: String,
    /// The decoded icon, or the failure message.
    pub result: Result<Arc<image::DynamicImage>, String>,
}

/// Loads app icons, sharing decoded results through an [`ImageCachePort`].
///
/// Icon downloads use the HTTP client's default timeout.
#[derive(Clone)]
pub struct IconLoader {
    cache: Arc<dyn ImageCachePort>,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for IconLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconLoader")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl IconLoader {
    /// Creates a loader backed by `cache`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(cache: Arc<dyn ImageCachePort>) -> CacheResult<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| CacheError::NetworkError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { cache, http_client })
    }

    /// Loads an icon, reusing the cached copy when present.
    ///
    /// # Errors
    /// Returns error if the download or decode fails.
    pub async fn load(&self, url: &str) -> CacheResult<Arc<image::DynamicImage>> {
        let id = ImageId::from_url(url);
        if let Some(img) = self.cache.get(&id) {
            return Ok(img);
        }

        debug!(id = %id, url, "Downloading icon");
        let bytes = self.download(url).await?;

        let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
            .await
            .map_err(|e| CacheError::DecodeError(format!("Decode task panicked: {e}")))?
            .map_err(|e| CacheError::DecodeError(format!("Failed to decode image: {e}")))?;

        let img = Arc::new(decoded);
        self.cache.put(id, img.clone());
        Ok(img)
    }

    /// Loads an icon in the background and reports the outcome on `events`.
    ///
    /// A closed channel is ignored; the icon still lands in the cache.
    pub fn prefetch(&self, url: String, events: mpsc::UnboundedSender<IconLoadedEvent>) {
        let loader = self.clone();
        tokio::spawn(async move {
            let result = loader.load(&url).await.map_err(|e| {
                warn!(url = %url, error = %e, "Icon load failed");
                e.to_string()
            });
            let _ = events.send(IconLoadedEvent { url, result });
        });
    }

    async fn download(&self, url: &str) -> CacheResult<Bytes> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| CacheError::NetworkError(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(CacheError::NetworkError(format!(
                "HTTP {}: {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| CacheError::NetworkError(format!("Failed to read body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::image::MemoryImageCache;
    use httpmock::prelude::*;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = Vec::new();
        image::DynamicImage::new_rgb8(4, 4)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn loader() -> (IconLoader, Arc<MemoryImageCache>) {
        let cache = Arc::new(MemoryImageCache::new());
        (IconLoader::new(cache.clone()).unwrap(), cache)
    }

    #[tokio::test]
    async fn test_second_load_served_from_cache() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/icon.png");
                then.status(200)
                    .header("content-type", "image/png")
                    .body(png_bytes());
            })
            .await;

        let (loader, cache) = loader();
        let url = server.url("/icon.png");

        let first = loader.load(&url).await.unwrap();
        let second = loader.load(&url).await.unwrap();

        assert_eq!(first.width(), 4);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.get_url(&url).is_some());
        assert_eq!(mock.hits_async().await, 1);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/icon.png");
                then.status(200).body("definitely not a png");
            })
            .await;

        let (loader, cache) = loader();
        let result = loader.load(&server.url("/icon.png")).await;

        assert!(matches!(result, Err(CacheError::DecodeError(_))));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/icon.png");
                then.status(404);
            })
            .await;

        let (loader, _cache) = loader();
        let result = loader.load(&server.url("/icon.png")).await;

        assert!(matches!(result, Err(CacheError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_prefetch_reports_event() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.path("/icon.png");
                then.status(200).body(png_bytes());
            })
            .await;

        let (loader, cache) = loader();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let url = server.url("/icon.png");

        loader.prefetch(url.clone(), tx);
        let event = rx.recv().await.unwrap();

        assert_eq!(event.url, url);
        assert!(event.result.is_ok());
        assert!(cache.get_url(&url).is_some());
    }
}
