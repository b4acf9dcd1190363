//! Domain layer with core catalog entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Compatibility filtering.
pub mod services;

pub use entities::{App, AppId, CatalogRequest, DeviceClass, DeviceContext, LoadState};
pub use errors::CatalogError;
pub use ports::{CatalogPort, CatalogResults, ImageCachePort};
