//! Icon handling infrastructure.
//!
//! This module provides:
//! - Memory caching, unbounded or LRU-bounded
//! - Async icon loading with cache reuse

pub mod loader;
pub mod memory_cache;

pub use loader::{IconLoadedEvent, IconLoader};
pub use memory_cache::{CacheStats, MemoryImageCache};
