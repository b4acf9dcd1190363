//! Use case implementations.

mod load_apps_use_case;

pub use load_apps_use_case::LoadAppsUseCase;
