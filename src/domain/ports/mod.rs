mod catalog_port;
mod image_cache_port;

pub use catalog_port::{CatalogPort, CatalogResults};
pub use image_cache_port::{CacheError, CacheResult, ImageCachePort};
