//! Decides which catalog apps can be shown on the current device.

use crate::domain::entities::{App, DeviceClass, DeviceContext, OsVersion};

/// Catalog `kind` for apps. Books, music and other media use other kinds.
pub const SOFTWARE_KIND: &str = "software";

/// Feature tag for apps that run on both iPhone and iPad.
pub const UNIVERSAL_FEATURE: &str = "iosUniversal";

/// An app listing more devices than this of the current family counts as
/// supporting it even without screenshots.
pub const SUPPORTED_DEVICE_THRESHOLD: usize = 5;

pub struct CompatibilityChecker;

impl CompatibilityChecker {
    /// Returns whether `app` can be installed on the described device.
    #[must_use]
    pub fn is_compatible(app: &App, device: &DeviceContext) -> bool {
        if app.kind() != SOFTWARE_KIND {
            return false;
        }

        if let Some(minimum) = app.minimum_os_version()
            && OsVersion::new(minimum) > *device.os_version()
        {
            return false;
        }

        if app.features().iter().any(|f| f == UNIVERSAL_FEATURE) {
            return true;
        }

        let has_screenshots = match device.class() {
            DeviceClass::Phone => !app.screenshot_urls().is_empty(),
            DeviceClass::Tablet => {
                !app.screenshot_urls().is_empty() || !app.ipad_screenshot_urls().is_empty()
            }
            DeviceClass::Other => return false,
        };

        has_screenshots
            || Self::supported_device_count(app, device.class()) > SUPPORTED_DEVICE_THRESHOLD
    }

    /// Returns whether `app` is the host application itself.
    ///
    /// Bundle id equality is a heuristic; an unset host id never matches.
    #[must_use]
    pub fn is_self_exclusion(app: &App, host_bundle_id: Option<&str>) -> bool {
        match (app.bundle_id(), host_bundle_id) {
            (Some(bundle_id), Some(host)) => bundle_id == host,
            _ => false,
        }
    }

    /// Display filter applied to every fetched app.
    #[must_use]
    pub fn should_display(app: &App, device: &DeviceContext, show_incompatible: bool) -> bool {
        (show_incompatible || Self::is_compatible(app, device))
            && !Self::is_self_exclusion(app, device.host_bundle_id())
    }

    fn supported_device_count(app: &App, class: DeviceClass) -> usize {
        let Some(prefix) = class.supported_device_prefix() else {
            return 0;
        };
        app.supported_devices()
            .iter()
            .filter(|device| {
                device
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            })
            .count()
    }
}
