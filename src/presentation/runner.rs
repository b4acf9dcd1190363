//! Drives one app list from start to a settled state.

use std::io;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::renderer::Renderer;
use crate::application::AppsViewModel;
use crate::domain::entities::LoadState;
use crate::infrastructure::image::IconLoader;

/// Runs a view model and renders every state it passes through.
#[derive(Debug)]
pub struct Runner<R: Renderer> {
    view_model: AppsViewModel,
    renderer: R,
    icons: Option<IconLoader>,
}

impl<R: Renderer> Runner<R> {
    pub const fn new(view_model: AppsViewModel, renderer: R) -> Self {
        Self {
            view_model,
            renderer,
            icons: None,
        }
    }

    /// Loads icons of the listed apps once the list settles.
    #[must_use]
    pub fn with_icons(mut self, loader: IconLoader) -> Self {
        self.icons = Some(loader);
        self
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Loads the list and returns the state it settled in.
    ///
    /// # Errors
    /// Returns error if rendering fails.
    pub async fn run(&mut self) -> io::Result<LoadState> {
        let mut states = self.view_model.subscribe();

        self.view_model.start();
        self.render_changes(&mut states)?;

        self.view_model.wait_for_completion().await;
        self.render_changes(&mut states)?;

        let state = self.view_model.state();
        if let Some(loader) = &self.icons
            && state.is_loaded()
        {
            let (loaded, failed) = load_icons(loader, &state).await;
            self.renderer.icons_loaded(loaded, failed)?;
        }

        Ok(state)
    }

    fn render_changes(&mut self, states: &mut watch::Receiver<LoadState>) -> io::Result<()> {
        if !states.has_changed().unwrap_or(false) {
            return Ok(());
        }
        let state = states.borrow_and_update().clone();
        let title = self.view_model.derived_title();
        self.renderer.render(&state, title.as_deref())
    }
}

async fn load_icons(loader: &IconLoader, state: &LoadState) -> (usize, usize) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut requested = 0;
    for url in state.apps().iter().filter_map(|app| app.icon_url()) {
        loader.prefetch(url.to_string(), tx.clone());
        requested += 1;
    }
    drop(tx);

    debug!(requested, "Prefetching icons");
    let (mut loaded, mut failed) = (0, 0);
    while let Some(event) = rx.recv().await {
        if event.result.is_ok() {
            loaded += 1;
        } else {
            failed += 1;
        }
    }
    info!(loaded, failed, "Icons loaded");
    (loaded, failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{AppsViewOptions, LoadAppsUseCase};
    use crate::domain::entities::{CatalogRequest, DeviceClass, DeviceContext, SoftwareRecord};
    use crate::domain::errors::CatalogError;
    use crate::domain::ports::{CatalogResults, ImageCachePort};
    use crate::domain::ports::mocks::MockCatalogPort;
    use crate::infrastructure::image::MemoryImageCache;
    use crate::presentation::renderer::TextRenderer;
    use httpmock::prelude::*;
    use std::sync::Arc;

    fn runner(catalog: MockCatalogPort, request: CatalogRequest) -> Runner<TextRenderer<Vec<u8>>> {
        let use_case = LoadAppsUseCase::new(
            Arc::new(catalog),
            DeviceContext::new(DeviceClass::Phone, "17.0"),
        );
        let vm = AppsViewModel::new(request, AppsViewOptions::default(), use_case);
        Runner::new(vm, TextRenderer::new(Vec::new()))
    }

    fn output(runner: Runner<TextRenderer<Vec<u8>>>) -> String {
        String::from_utf8(runner.into_renderer().into_inner()).unwrap()
    }

    #[tokio::test]
    async fn test_renders_loading_then_results() {
        let mut catalog = MockCatalogPort::new();
        catalog.expect_lookup().returning(|_| {
            let record: SoftwareRecord = serde_json::from_value(serde_json::json!({
                "trackId": 7,
                "trackName": "Tides",
                "kind": "software",
                "features": ["iosUniversal"]
            }))
            .unwrap();
            Ok(CatalogResults::new(vec![record], None))
        });

        let mut runner = runner(catalog, CatalogRequest::search("tides"));
        let state = runner.run().await.unwrap();

        assert!(state.is_loaded());
        let out = output(runner);
        assert!(out.starts_with("Loading…\ntides\n"));
        assert!(out.contains("1. Tides"));
    }

    #[tokio::test]
    async fn test_renders_error() {
        let mut catalog = MockCatalogPort::new();
        catalog
            .expect_lookup()
            .returning(|_| Err(CatalogError::transport("connection refused")));

        let mut runner = runner(catalog, CatalogRequest::developer(1));
        let state = runner.run().await.unwrap();

        assert!(state.is_error());
        assert!(output(runner).contains("Error Loading Apps"));
    }

    #[tokio::test]
    async fn test_icons_are_prefetched() {
        let server = MockServer::start_async().await;
        let mut png = Vec::new();
        image::DynamicImage::new_rgb8(2, 2)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        server
            .mock_async(|when, then| {
                when.path("/512.png");
                then.status(200).body(png);
            })
            .await;

        let icon = server.url("/512.png");
        let mut catalog = MockCatalogPort::new();
        catalog.expect_lookup().returning(move |_| {
            let record: SoftwareRecord = serde_json::from_value(serde_json::json!({
                "trackId": 7,
                "trackName": "Tides",
                "kind": "software",
                "features": ["iosUniversal"],
                "artworkUrl512": icon
            }))
            .unwrap();
            Ok(CatalogResults::new(vec![record], None))
        });

        let cache = Arc::new(MemoryImageCache::new());
        let loader = IconLoader::new(cache.clone()).unwrap();
        let mut runner = runner(catalog, CatalogRequest::app_ids([7])).with_icons(loader);
        runner.run().await.unwrap();

        assert_eq!(cache.len(), 1);
        assert!(output(runner).ends_with("Loaded 1 icon(s)\n"));
    }
}
