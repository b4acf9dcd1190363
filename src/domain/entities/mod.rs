//! Domain entity definitions.

mod app;
mod catalog_request;
mod device;
mod image;
mod load_state;
mod os_version;
mod records;

pub use app::{App, AppId};
pub use catalog_request::CatalogRequest;
pub use device::{DeviceClass, DeviceContext};
pub use self::image::ImageId;
pub use load_state::LoadState;
pub use os_version::OsVersion;
pub use records::{ArtistRecord, SoftwareRecord};
