//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Icon caching and loading.
pub mod image;
/// iTunes Search API client.
pub mod itunes;
/// Storefront locale detection.
pub mod locale;

pub use config::{AppConfig, CliArgs, LogLevel};
pub use self::image::{CacheStats, IconLoadedEvent, IconLoader, MemoryImageCache};
pub use itunes::ItunesClient;
pub use locale::Locale;
