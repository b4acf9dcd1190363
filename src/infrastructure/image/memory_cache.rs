//! In-memory icon cache.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::ImageId;
use crate::domain::ports::ImageCachePort;

enum Store {
    Unbounded(HashMap<ImageId, Arc<image::DynamicImage>>),
    Bounded(LruCache<ImageId, Arc<image::DynamicImage>>),
}

/// Process-lifetime cache of decoded icons.
///
/// Unbounded by default; [`MemoryImageCache::bounded`] switches to LRU
/// eviction. Writes take an exclusive lock, so concurrent loads can race on
/// the same key without tearing an entry.
pub struct MemoryImageCache {
    store: RwLock<Store>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryImageCache {
    /// Creates an unbounded cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Store::Unbounded(HashMap::new()))
    }

    /// Creates a cache that evicts the least recently used icon past `capacity`.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self::with_store(Store::Bounded(LruCache::new(cap)))
    }

    /// Creates a bounded cache when a capacity is given, unbounded otherwise.
    #[must_use]
    pub fn with_capacity(capacity: Option<usize>) -> Self {
        capacity.map_or_else(Self::new, Self::bounded)
    }

    fn with_store(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Looks up the icon stored for `url`.
    pub fn get_url(&self, url: &str) -> Option<Arc<image::DynamicImage>> {
        self.get(&ImageId::from_url(url))
    }

    /// Stores the icon for `url`.
    pub fn put_url(&self, url: &str, image: Arc<image::DynamicImage>) {
        self.put(ImageId::from_url(url), image);
    }

    /// Peeks at an image without promoting it in the LRU.
    pub fn peek(&self, id: &ImageId) -> Option<Arc<image::DynamicImage>> {
        match &*self.store.read() {
            Store::Unbounded(map) => map.get(id).cloned(),
            Store::Bounded(lru) => lru.peek(id).cloned(),
        }
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryImageCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached images.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} images, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

impl ImageCachePort for MemoryImageCache {
    fn get(&self, id: &ImageId) -> Option<Arc<image::DynamicImage>> {
        let found = match &mut *self.store.write() {
            Store::Unbounded(map) => map.get(id).cloned(),
            Store::Bounded(lru) => lru.get(id).cloned(),
        };

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, "Memory cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, "Memory cache miss");
        }
        found
    }

    fn put(&self, id: ImageId, image: Arc<image::DynamicImage>) {
        debug!(id = %id, "Storing image in memory cache");
        match &mut *self.store.write() {
            Store::Unbounded(map) => {
                map.insert(id, image);
            }
            Store::Bounded(lru) => {
                lru.put(id, image);
            }
        }
    }

    fn len(&self) -> usize {
        match &*self.store.read() {
            Store::Unbounded(map) => map.len(),
            Store::Bounded(lru) => lru.len(),
        }
    }

    fn clear(&self) {
        match &mut *self.store.write() {
            Store::Unbounded(map) => map.clear(),
            Store::Bounded(lru) => lru.clear(),
        }
        debug!("Cleared memory image cache");
    }
}
