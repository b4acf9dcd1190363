//! Pure domain services.

pub mod compatibility;

pub use compatibility::CompatibilityChecker;
