//! Appshelf - App Store catalog listings for embedding in other apps.
//!
//! This crate fetches apps from the iTunes lookup and search API by developer,
//! app ids or search term, filters them for the current device and drives the
//! list through a small load state machine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, DTOs and the list state machine.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing rendering and the run loop.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "appshelf";
