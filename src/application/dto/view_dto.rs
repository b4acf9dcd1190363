//! App list DTOs.

use crate::domain::entities::{App, AppId};

/// Caller overrides for an app list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppsViewOptions {
    /// Whether apps incompatible with the current device are shown.
    pub show_incompatible_apps: bool,
    /// Title used instead of the derived one in the loaded state.
    pub loaded_title: Option<String>,
}

impl AppsViewOptions {
    /// Shows incompatible apps too.
    #[must_use]
    pub const fn with_incompatible_apps(mut self) -> Self {
        self.show_incompatible_apps = true;
        self
    }

    /// Sets the title override.
    #[must_use]
    pub fn with_loaded_title(mut self, title: impl Into<String>) -> Self {
        self.loaded_title = Some(title.into());
        self
    }
}

/// User action raised from a rendered app row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// Open the store page for the app.
    ViewDetail(AppId),
    /// Share the app's public link.
    Share {
        /// The shared app.
        app_id: AppId,
        /// Deep link handed to the share sheet.
        url: String,
    },
}

/// Apps ready for display after filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedApps {
    /// Displayable apps in catalog order.
    pub apps: Vec<App>,
    /// Publisher name, when the response carried one.
    pub developer_name: Option<String>,
}
