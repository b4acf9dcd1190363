//! App catalog entity.

use serde::{Deserialize, Serialize};

use super::SoftwareRecord;

/// Deep link template used when sharing an app.
const SHARE_URL_BASE: &str = "https://apps.apple.com/us/app/id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppId(pub u64);

impl AppId {
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Public App Store link for this app.
    #[must_use]
    pub fn share_url(self) -> String {
        format!("{SHARE_URL_BASE}{}", self.0)
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AppId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A catalog app ready for display.
///
/// Built once per fetch from a [`SoftwareRecord`] and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    id: AppId,
    name: String,
    kind: String,
    genres: Vec<String>,
    artist_id: Option<u64>,
    bundle_id: Option<String>,
    formatted_price: Option<String>,
    screenshot_urls: Option<Vec<String>>,
    ipad_screenshot_urls: Option<Vec<String>>,
    features: Option<Vec<String>>,
    supported_devices: Option<Vec<String>>,
    minimum_os_version: Option<String>,
    artwork_url_100: Option<String>,
    artwork_url_512: Option<String>,
    average_user_rating: Option<f32>,
    user_rating_count: Option<u64>,
}

impl App {
    /// Creates a software app with only the display essentials set.
    #[must_use]
    pub fn new(id: impl Into<AppId>, name: impl Into<String>, genres: Vec<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: "software".to_string(),
            genres,
            artist_id: None,
            bundle_id: None,
            formatted_price: None,
            screenshot_urls: None,
            ipad_screenshot_urls: None,
            features: None,
            supported_devices: None,
            minimum_os_version: None,
            artwork_url_100: None,
            artwork_url_512: None,
            average_user_rating: None,
            user_rating_count: None,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    #[must_use]
    pub fn with_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = Some(bundle_id.into());
        self
    }

    #[must_use]
    pub fn with_screenshots(mut self, urls: Vec<String>) -> Self {
        self.screenshot_urls = Some(urls);
        self
    }

    #[must_use]
    pub fn with_ipad_screenshots(mut self, urls: Vec<String>) -> Self {
        self.ipad_screenshot_urls = Some(urls);
        self
    }

    #[must_use]
    pub fn with_features(mut self, features: Vec<String>) -> Self {
        self.features = Some(features);
        self
    }

    #[must_use]
    pub fn with_supported_devices(mut self, devices: Vec<String>) -> Self {
        self.supported_devices = Some(devices);
        self
    }

    #[must_use]
    pub fn with_minimum_os_version(mut self, version: impl Into<String>) -> Self {
        self.minimum_os_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_artwork(mut self, url_100: Option<String>, url_512: Option<String>) -> Self {
        self.artwork_url_100 = url_100;
        self.artwork_url_512 = url_512;
        self
    }

    #[must_use]
    pub fn with_formatted_price(mut self, price: impl Into<String>) -> Self {
        self.formatted_price = Some(price.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> AppId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    /// First listed genre, used as the row subtitle.
    #[must_use]
    pub fn primary_genre(&self) -> Option<&str> {
        self.genres.first().map(String::as_str)
    }

    #[must_use]
    pub const fn artist_id(&self) -> Option<u64> {
        self.artist_id
    }

    #[must_use]
    pub fn bundle_id(&self) -> Option<&str> {
        self.bundle_id.as_deref()
    }

    #[must_use]
    pub fn formatted_price(&self) -> Option<&str> {
        self.formatted_price.as_deref()
    }

    #[must_use]
    pub fn screenshot_urls(&self) -> &[String] {
        self.screenshot_urls.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn ipad_screenshot_urls(&self) -> &[String] {
        self.ipad_screenshot_urls.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn features(&self) -> &[String] {
        self.features.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn supported_devices(&self) -> &[String] {
        self.supported_devices.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn minimum_os_version(&self) -> Option<&str> {
        self.minimum_os_version.as_deref()
    }

    #[must_use]
    pub const fn average_user_rating(&self) -> Option<f32> {
        self.average_user_rating
    }

    #[must_use]
    pub const fn user_rating_count(&self) -> Option<u64> {
        self.user_rating_count
    }

    /// Best available icon, preferring the 512px artwork.
    #[must_use]
    pub fn icon_url(&self) -> Option<&str> {
        self.artwork_url_512
            .as_deref()
            .or(self.artwork_url_100.as_deref())
    }

    #[must_use]
    pub fn share_url(&self) -> String {
        self.id.share_url()
    }
}

impl From<SoftwareRecord> for App {
    fn from(record: SoftwareRecord) -> Self {
        Self {
            id: AppId(record.track_id),
            name: record.track_name,
            kind: record.kind,
            genres: record.genres,
            artist_id: record.artist_id,
            bundle_id: record.bundle_id,
            formatted_price: record.formatted_price,
            screenshot_urls: record.screenshot_urls,
            ipad_screenshot_urls: record.ipad_screenshot_urls,
            features: record.features,
            supported_devices: record.supported_devices,
            minimum_os_version: record.minimum_os_version,
            artwork_url_100: record.artwork_url100,
            artwork_url_512: record.artwork_url512,
            average_user_rating: record.average_user_rating,
            user_rating_count: record.user_rating_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SoftwareRecord {
        serde_json::from_value(serde_json::json!({
            "trackId": 284882215,
            "trackName": "Facebook",
            "kind": "software",
            "genres": ["Social Networking"],
            "bundleId": "com.facebook.Facebook",
            "artworkUrl100": "https://example.com/100.png",
            "averageUserRating": 4.5,
            "userRatingCount": 1200
        }))
        .unwrap()
    }

    #[test]
    fn test_from_record_copies_fields() {
        let app = App::from(record());

        assert_eq!(app.id(), AppId(284_882_215));
        assert_eq!(app.name(), "Facebook");
        assert_eq!(app.primary_genre(), Some("Social Networking"));
        assert_eq!(app.bundle_id(), Some("com.facebook.Facebook"));
        assert_eq!(app.average_user_rating(), Some(4.5));
        assert_eq!(app.user_rating_count(), Some(1200));
        assert!(app.minimum_os_version().is_none());
        assert!(app.screenshot_urls().is_empty());
    }

    #[test]
    fn test_icon_prefers_large_artwork() {
        let app = App::new(AppId(1), "One", vec![]).with_artwork(
            Some("https://example.com/100.png".to_string()),
            Some("https://example.com/512.png".to_string()),
        );
        assert_eq!(app.icon_url(), Some("https://example.com/512.png"));

        let small_only = App::from(record());
        assert_eq!(small_only.icon_url(), Some("https://example.com/100.png"));

        assert!(App::new(AppId(2), "Two", vec![]).icon_url().is_none());
    }

    #[test]
    fn test_share_url() {
        let app = App::new(AppId(389_801_252), "Instagram", vec![]);
        assert_eq!(app.share_url(), "https://apps.apple.com/us/app/id389801252");
    }
}
