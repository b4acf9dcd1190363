pub mod apps_view_model;

pub use apps_view_model::{AppsViewModel, OpenedCallback};
