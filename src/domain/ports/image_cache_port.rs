//! Port definition for icon caching.

use std::sync::Arc;

use crate::domain::entities::ImageId;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur while loading a cacheable image.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// Failed to decode image.
    #[error("Decode error: {0}")]
    DecodeError(String),
    /// Network error during download.
    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Port for decoded image caches.
/// Implementations must be thread-safe; concurrent `put`s may race and the
/// last one wins.
pub trait ImageCachePort: Send + Sync {
    /// Returns the cached image, or `None` if it was never stored.
    fn get(&self, id: &ImageId) -> Option<Arc<image::DynamicImage>>;

    /// Stores an image, replacing any previous entry for the same id.
    fn put(&self, id: ImageId, image: Arc<image::DynamicImage>);

    /// Returns the current number of cached images.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears all images from the cache.
    fn clear(&self);
}
