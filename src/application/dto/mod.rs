//! Data transfer objects for the application layer.

mod view_dto;

pub use view_dto::{AppsViewOptions, ItemAction, LoadedApps};
