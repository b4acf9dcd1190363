//! Load apps use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::LoadedApps;
use crate::domain::entities::{App, CatalogRequest, DeviceContext};
use crate::domain::errors::CatalogError;
use crate::domain::ports::CatalogPort;
use crate::domain::services::CompatibilityChecker;

/// Fetches a catalog listing and reduces it to the apps worth showing.
#[derive(Clone)]
pub struct LoadAppsUseCase {
    catalog: Arc<dyn CatalogPort>,
    device: DeviceContext,
}

impl LoadAppsUseCase {
    #[must_use]
    pub const fn new(catalog: Arc<dyn CatalogPort>, device: DeviceContext) -> Self {
        Self { catalog, device }
    }

    /// Runs one lookup and filters the result for the current device.
    ///
    /// # Errors
    /// Returns the catalog error unchanged.
    pub async fn execute(
        &self,
        request: &CatalogRequest,
        show_incompatible_apps: bool,
    ) -> Result<LoadedApps, CatalogError> {
        debug!(%request, "Loading apps");

        let results = self.catalog.lookup(request).await.map_err(|e| {
            warn!(error = %e, %request, "Catalog lookup failed");
            e
        })?;

        let fetched = results.software.len();
        let apps: Vec<App> = results
            .software
            .into_iter()
            .map(App::from)
            .filter(|app| {
                CompatibilityChecker::should_display(app, &self.device, show_incompatible_apps)
            })
            .collect();

        info!(
            %request,
            fetched,
            shown = apps.len(),
            "Loaded apps"
        );

        Ok(LoadedApps {
            apps,
            developer_name: results.artist.map(|artist| artist.artist_name),
        })
    }
}
