//! Freshness-based cache of catalog response bodies.
//!
//! Mirrors a platform HTTP cache with a "return cached data, else load"
//! policy: a body is reused while its `Cache-Control: max-age` is live.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use bytes::Bytes;
use lru::LruCache;
use parking_lot::Mutex;
use reqwest::header::{CACHE_CONTROL, HeaderMap};
use tracing::trace;

/// Default number of catalog responses kept.
pub const DEFAULT_HTTP_CACHE_ENTRIES: usize = 32;

struct CachedBody {
    body: Bytes,
    expires_at: Instant,
}

/// Bounded cache of fresh response bodies keyed by request URL.
pub struct HttpResponseCache {
    entries: Mutex<LruCache<String, CachedBody>>,
}

impl HttpResponseCache {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(cap)),
        }
    }

    /// Returns the body for `url` if it is still fresh. Stale entries are dropped.
    pub fn fresh(&self, url: &str) -> Option<Bytes> {
        self.fresh_at(url, Instant::now())
    }

    fn fresh_at(&self, url: &str, now: Instant) -> Option<Bytes> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(url) {
            Some(entry) if entry.expires_at > now => {
                trace!(url, "HTTP cache hit");
                return Some(entry.body.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(url);
            trace!(url, "HTTP cache entry expired");
        }
        None
    }

    /// Stores `body` if the response headers allow caching.
    pub fn store(&self, url: &str, headers: &HeaderMap, body: Bytes) {
        let Some(max_age) = cache_lifetime(headers) else {
            return;
        };
        self.store_until(url, body, Instant::now() + max_age);
    }

    fn store_until(&self, url: &str, body: Bytes, expires_at: Instant) {
        self.entries
            .lock()
            .put(url.to_string(), CachedBody { body, expires_at });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for HttpResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_HTTP_CACHE_ENTRIES)
    }
}

/// Reads a positive `max-age` from `Cache-Control`, honoring `no-store`
/// and `no-cache`.
fn cache_lifetime(headers: &HeaderMap) -> Option<Duration> {
    let mut max_age = None;

    for value in headers.get_all(CACHE_CONTROL) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for directive in value.split(',').map(str::trim) {
            let lower = directive.to_ascii_lowercase();
            if lower == "no-store" || lower == "no-cache" {
                return None;
            }
            if let Some(seconds) = lower.strip_prefix("max-age=")
                && let Ok(seconds) = seconds.trim_matches('"').parse::<u64>()
            {
                max_age = Some(seconds);
            }
        }
    }

    max_age.filter(|s| *s > 0).map(Duration::from_secs)
}
