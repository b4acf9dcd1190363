//! Presentation layer: text rendering and the run loop.

/// State rendering.
pub mod renderer;
/// Run loop for a single list.
pub mod runner;

pub use renderer::{Renderer, TextRenderer};
pub use runner::Runner;
