//! Raw catalog records as returned by the lookup service.
//!
//! The `results` array of a lookup response mixes several record shapes.
//! These types describe the two the app list understands.

use serde::Deserialize;

/// A catalog item record (`wrapperType: software` and friends).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SoftwareRecord {
    pub track_id: u64,
    pub track_name: String,
    /// Media kind. Only `"software"` is an app.
    pub kind: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub artist_id: Option<u64>,
    #[serde(default)]
    pub bundle_id: Option<String>,
    #[serde(default)]
    pub formatted_price: Option<String>,
    #[serde(default)]
    pub screenshot_urls: Option<Vec<String>>,
    #[serde(default)]
    pub ipad_screenshot_urls: Option<Vec<String>>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub supported_devices: Option<Vec<String>>,
    #[serde(default)]
    pub minimum_os_version: Option<String>,
    #[serde(default)]
    pub artwork_url100: Option<String>,
    #[serde(default)]
    pub artwork_url512: Option<String>,
    #[serde(default)]
    pub average_user_rating: Option<f32>,
    #[serde(default)]
    pub user_rating_count: Option<u64>,
}

/// A publisher (artist) record, present in developer lookups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ArtistRecord {
    pub artist_name: String,
    pub artist_id: u64,
}
