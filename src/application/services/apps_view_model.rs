//! Load state machine for a single app list.
//!
//! Catalog requests run on spawned tasks and report back over a channel.
//! Completions only touch state when the owner drains them with
//! [`AppsViewModel::wait_for_completion`] or [`AppsViewModel::poll_completions`],
//! so every visible transition happens on the owner's task.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::application::dto::{AppsViewOptions, ItemAction, LoadedApps};
use crate::application::use_cases::LoadAppsUseCase;
use crate::domain::entities::{AppId, CatalogRequest, LoadState};
use crate::domain::errors::CatalogError;

/// Callback invoked when the user asks to view an app's store page.
pub type OpenedCallback = Box<dyn Fn(AppId) + Send + Sync>;

#[derive(Debug)]
struct Completion {
    generation: u64,
    result: Result<LoadedApps, CatalogError>,
}

pub struct AppsViewModel {
    request: CatalogRequest,
    options: AppsViewOptions,
    use_case: LoadAppsUseCase,
    state_tx: watch::Sender<LoadState>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    generation: u64,
    action_tx: Option<mpsc::UnboundedSender<ItemAction>>,
    on_opened: Option<OpenedCallback>,
}

impl std::fmt::Debug for AppsViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppsViewModel")
            .field("request", &self.request)
            .field("options", &self.options)
            .field("state", &*self.state_tx.borrow())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl AppsViewModel {
    #[must_use]
    pub fn new(
        request: CatalogRequest,
        options: AppsViewOptions,
        use_case: LoadAppsUseCase,
    ) -> Self {
        let (state_tx, _) = watch::channel(LoadState::Unloaded);
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            request,
            options,
            use_case,
            state_tx,
            completion_tx,
            completion_rx,
            generation: 0,
            action_tx: None,
            on_opened: None,
        }
    }

    /// Emits per-item actions on `action_tx`.
    #[must_use]
    pub fn with_actions(mut self, action_tx: mpsc::UnboundedSender<ItemAction>) -> Self {
        self.action_tx = Some(action_tx);
        self
    }

    /// Calls `callback` whenever a detail view is requested.
    #[must_use]
    pub fn with_opened_callback(
        mut self,
        callback: impl Fn(AppId) + Send + Sync + 'static,
    ) -> Self {
        self.on_opened = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub const fn request(&self) -> &CatalogRequest {
        &self.request
    }

    #[must_use]
    pub const fn options(&self) -> &AppsViewOptions {
        &self.options
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    /// Enters `Loading` and fetches in the background. No-op while loading.
    pub fn start(&mut self) {
        if self.state_tx.borrow().is_loading() {
            debug!(request = %self.request, "Load already in flight");
            return;
        }

        self.generation += 1;
        self.state_tx.send_replace(LoadState::Loading);

        let generation = self.generation;
        let use_case = self.use_case.clone();
        let request = self.request.clone();
        let show_incompatible = self.options.show_incompatible_apps;
        let tx = self.completion_tx.clone();

        debug!(request = %request, generation, "Starting catalog load");
        tokio::spawn(async move {
            let lookup =
                tokio::spawn(async move { use_case.execute(&request, show_incompatible).await });
            let result = lookup.await.unwrap_or_else(|e| {
                warn!(error = %e, generation, "Catalog load task failed");
                Err(CatalogError::transport(format!("catalog lookup aborted: {e}")))
            });
            // The owner may be gone; the result is dropped with it.
            let _ = tx.send(Completion { generation, result });
        });
    }

    /// Restarts the load after a failure. Ignored in any other state.
    pub fn retry(&mut self) {
        if !self.state_tx.borrow().is_error() {
            debug!(request = %self.request, "Retry ignored outside error state");
            return;
        }
        info!(request = %self.request, "Retrying catalog load");
        self.start();
    }

    /// Waits for the in-flight load and applies it.
    ///
    /// Returns `false` right away when nothing is loading.
    pub async fn wait_for_completion(&mut self) -> bool {
        while self.state_tx.borrow().is_loading() {
            let Some(completion) = self.completion_rx.recv().await else {
                return false;
            };
            if self.apply(completion) {
                return true;
            }
        }
        false
    }

    /// Applies any completions that already arrived. Returns how many changed state.
    pub fn poll_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            if self.apply(completion) {
                applied += 1;
            }
        }
        applied
    }

    fn apply(&mut self, completion: Completion) -> bool {
        if completion.generation != self.generation || !self.state_tx.borrow().is_loading() {
            debug!(
                generation = completion.generation,
                current = self.generation,
                "Discarding stale completion"
            );
            return false;
        }

        let next = match completion.result {
            Ok(loaded) => LoadState::Loaded {
                apps: loaded.apps,
                developer_name: loaded.developer_name,
            },
            Err(e) => {
                warn!(request = %self.request, error = %e, "Catalog load failed");
                LoadState::Error(e)
            }
        };
        self.state_tx.send_replace(next);
        true
    }

    /// Title for the list, if one can be derived.
    ///
    /// An explicit override always wins. Otherwise developer listings use the
    /// fetched developer name, searches use the search term, and app id
    /// listings have none.
    #[must_use]
    pub fn derived_title(&self) -> Option<String> {
        if let Some(title) = &self.options.loaded_title {
            return Some(title.clone());
        }
        match &self.request {
            CatalogRequest::Developer(_) => {
                self.state_tx.borrow().developer_name().map(str::to_string)
            }
            CatalogRequest::AppIds(_) => None,
            CatalogRequest::SearchTerm(term) => Some(term.clone()),
        }
    }

    /// Public store link for an app.
    #[must_use]
    pub fn share_link(app_id: AppId) -> String {
        app_id.share_url()
    }

    /// Records that the user wants the store page for `app_id`.
    pub fn request_view_detail(&self, app_id: AppId) {
        debug!(app_id = %app_id, "View detail requested");
        if let Some(callback) = &self.on_opened {
            callback(app_id);
        }
        self.emit(ItemAction::ViewDetail(app_id));
    }

    /// Records a share request and returns the link to share.
    pub fn request_share(&self, app_id: AppId) -> String {
        let url = Self::share_link(app_id);
        debug!(app_id = %app_id, url = %url, "Share requested");
        self.emit(ItemAction::Share {
            app_id,
            url: url.clone(),
        });
        url
    }

    fn emit(&self, action: ItemAction) {
        if let Some(tx) = &self.action_tx {
            let _ = tx.send(action);
        }
    }
}
