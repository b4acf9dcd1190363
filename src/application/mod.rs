//! Application layer with use cases, DTOs and the list state machine.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{AppsViewOptions, ItemAction, LoadedApps};
pub use services::{AppsViewModel, OpenedCallback};
pub use use_cases::LoadAppsUseCase;
