//! Plain text rendering of the app list.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::domain::entities::{App, LoadState};

/// Shown while a request is in flight.
pub const LOADING_LABEL: &str = "Loading…";
/// Title of the error screen.
pub const ERROR_TITLE: &str = "Error Loading Apps";
/// Title used when none could be derived.
pub const RESULTS_TITLE: &str = "Results";
/// Shown for an empty loaded list.
pub const EMPTY_LABEL: &str = "No Results";

/// Draws load states somewhere.
pub trait Renderer {
    /// Renders `state` under `title`.
    ///
    /// # Errors
    /// Returns error if the output cannot be written.
    fn render(&mut self, state: &LoadState, title: Option<&str>) -> io::Result<()>;

    /// Reports how many icons finished loading.
    ///
    /// # Errors
    /// Returns error if the output cannot be written.
    fn icons_loaded(&mut self, _loaded: usize, _failed: usize) -> io::Result<()> {
        Ok(())
    }
}

/// Writes states as plain text lines.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextRenderer<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, state: &LoadState, title: Option<&str>) -> io::Result<()> {
        let text = format_state(state, title);
        if text.is_empty() {
            return Ok(());
        }
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn icons_loaded(&mut self, loaded: usize, failed: usize) -> io::Result<()> {
        if failed == 0 {
            writeln!(self.out, "Loaded {loaded} icon(s)")?;
        } else {
            writeln!(self.out, "Loaded {loaded} icon(s), {failed} failed")?;
        }
        self.out.flush()
    }
}

/// Formats a state as text. `Unloaded` renders as nothing.
#[must_use]
pub fn format_state(state: &LoadState, title: Option<&str>) -> String {
    let mut out = String::new();
    match state {
        LoadState::Unloaded => {}
        LoadState::Loading => {
            let _ = writeln!(out, "{LOADING_LABEL}");
        }
        LoadState::Error(error) => {
            let _ = writeln!(out, "{ERROR_TITLE}");
            let _ = writeln!(out, "  {error}");
            if error.is_transport() {
                let _ = writeln!(out, "  Check your connection and try again.");
            }
        }
        LoadState::Loaded { apps, .. } => {
            let _ = writeln!(out, "{}", title.unwrap_or(RESULTS_TITLE));
            if apps.is_empty() {
                let _ = writeln!(out, "  {EMPTY_LABEL}");
            }
            for (index, app) in apps.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {}", index + 1, format_row(app));
                let _ = writeln!(out, "     {}", app.share_url());
            }
        }
    }
    out
}

fn format_row(app: &App) -> String {
    let mut parts = vec![app.name().to_string()];
    if let Some(genre) = app.primary_genre() {
        parts.push(genre.to_string());
    }
    if let Some(price) = app.formatted_price() {
        parts.push(price.to_string());
    }
    if let Some(rating) = app.average_user_rating() {
        match app.user_rating_count() {
            Some(count) => parts.push(format!("{rating:.1}★ ({count})")),
            None => parts.push(format!("{rating:.1}★")),
        }
    }
    parts.join(" · ")
}
