//! Catalog fetch error types.

use thiserror::Error;

/// Why a catalog fetch ended in the error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum CatalogError {
    #[error("network error: {message}")]
    Transport { message: String },

    #[error("the App Store returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("could not read the App Store response: {message}")]
    Decode { message: String },

    #[error("could not build the App Store request")]
    UnbuildableRequest,
}

impl CatalogError {
    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns whether the request never produced a usable HTTP response.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::HttpStatus { .. })
    }

    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(CatalogError::transport("timed out").is_transport());
        assert!(CatalogError::HttpStatus { status: 503 }.is_transport());
        assert!(CatalogError::decode("bad json").is_decode());
        assert!(!CatalogError::UnbuildableRequest.is_transport());
        assert!(!CatalogError::UnbuildableRequest.is_decode());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::HttpStatus { status: 404 }.to_string(),
            "the App Store returned HTTP 404"
        );
        assert_eq!(
            CatalogError::transport("request timed out").to_string(),
            "network error: request timed out"
        );
    }
}
