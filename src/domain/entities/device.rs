//! Device and runtime context the app list is filtered against.

use serde::{Deserialize, Serialize};

use super::OsVersion;

/// Form factor of the device the list is shown on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// iPhone-class device.
    #[default]
    Phone,
    /// iPad-class device.
    Tablet,
    /// Anything else (desktop, TV, watch).
    Other,
}

impl DeviceClass {
    /// Lowercase prefix the catalog uses for this family in `supportedDevices`.
    #[must_use]
    pub const fn supported_device_prefix(self) -> Option<&'static str> {
        match self {
            Self::Phone => Some("iphone"),
            Self::Tablet => Some("ipad"),
            Self::Other => None,
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Phone => write!(f, "phone"),
            Self::Tablet => write!(f, "tablet"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Everything about the host needed to decide what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    class: DeviceClass,
    os_version: OsVersion,
    host_bundle_id: Option<String>,
}

impl DeviceContext {
    #[must_use]
    pub fn new(class: DeviceClass, os_version: impl Into<OsVersion>) -> Self {
        Self {
            class,
            os_version: os_version.into(),
            host_bundle_id: None,
        }
    }

    /// Sets the bundle id of the app embedding the list.
    #[must_use]
    pub fn with_host_bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.host_bundle_id = Some(bundle_id.into());
        self
    }

    #[must_use]
    pub const fn class(&self) -> DeviceClass {
        self.class
    }

    #[must_use]
    pub const fn os_version(&self) -> &OsVersion {
        &self.os_version
    }

    #[must_use]
    pub fn host_bundle_id(&self) -> Option<&str> {
        self.host_bundle_id.as_deref()
    }
}
