//! Port definition for the App Store catalog.

use async_trait::async_trait;

use crate::domain::entities::{ArtistRecord, CatalogRequest, SoftwareRecord};
use crate::domain::errors::CatalogError;

/// Records recognized in one catalog response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogResults {
    /// Item records in response order.
    pub software: Vec<SoftwareRecord>,
    /// First publisher record seen, if any.
    pub artist: Option<ArtistRecord>,
}

impl CatalogResults {
    #[must_use]
    pub const fn new(software: Vec<SoftwareRecord>, artist: Option<ArtistRecord>) -> Self {
        Self { software, artist }
    }
}

/// Port for catalog lookups.
///
/// One call produces exactly one response. Implementations never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetches the records matching `request`.
    async fn lookup(&self, request: &CatalogRequest) -> Result<CatalogResults, CatalogError>;
}
