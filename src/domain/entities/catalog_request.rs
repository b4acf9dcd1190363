//! Catalog request value object.

use std::fmt;

/// Which slice of the App Store catalog to fetch.
///
/// Chosen once when a view model is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogRequest {
    /// All apps published by the given iTunes artist (developer) id.
    Developer(u64),
    /// A fixed list of app ids. Duplicates are passed through untouched.
    AppIds(Vec<u64>),
    /// A free-text App Store search.
    SearchTerm(String),
}

impl CatalogRequest {
    /// Creates a developer request.
    #[must_use]
    pub const fn developer(id: u64) -> Self {
        Self::Developer(id)
    }

    /// Creates a request for an explicit list of app ids.
    #[must_use]
    pub fn app_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self::AppIds(ids.into_iter().collect())
    }

    /// Creates a search request.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self::SearchTerm(term.into())
    }

    /// Short label used in log fields.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Developer(_) => "developer",
            Self::AppIds(_) => "app_ids",
            Self::SearchTerm(_) => "search",
        }
    }
}

impl fmt::Display for CatalogRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Developer(id) => write!(f, "developer {id}"),
            Self::AppIds(ids) => write!(f, "{} app id(s)", ids.len()),
            Self::SearchTerm(term) => write!(f, "search \"{term}\""),
        }
    }
}
