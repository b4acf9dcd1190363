//! Lifecycle of a single app list.

use super::App;
use crate::domain::errors::CatalogError;

/// Where the app list is in its load cycle.
///
/// `Error` and `Loaded` stay put until a retry or re-fetch moves back to
/// `Loading`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Unloaded,
    /// A catalog request is in flight.
    Loading,
    /// The last request failed.
    Error(CatalogError),
    /// The last request succeeded; `apps` is already filtered for display.
    Loaded {
        /// Apps in catalog order.
        apps: Vec<App>,
        /// Publisher name when the lookup returned an artist record.
        developer_name: Option<String>,
    },
}

impl LoadState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Apps of a loaded state, empty otherwise.
    #[must_use]
    pub fn apps(&self) -> &[App] {
        match self {
            Self::Loaded { apps, .. } => apps,
            _ => &[],
        }
    }

    #[must_use]
    pub fn developer_name(&self) -> Option<&str> {
        match self {
            Self::Loaded { developer_name, .. } => developer_name.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<&CatalogError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }
}
