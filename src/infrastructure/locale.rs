//! Storefront locale detection.

use std::fmt;

use tracing::debug;

const DEFAULT_COUNTRY: &str = "US";
const DEFAULT_LANGUAGE: &str = "en";
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Country and language sent with every catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    country: String,
    language: String,
}

impl Locale {
    #[must_use]
    pub fn new(country: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            country: country.into().to_uppercase(),
            language: language.into().to_lowercase(),
        }
    }

    /// Parses a POSIX or BCP 47 style tag such as `en_US.UTF-8` or `de-AT`.
    ///
    /// Returns `None` for tags without a two-letter region, including `C` and
    /// `POSIX`.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.split(['.', '@']).next()?.trim();
        let (language, rest) = tag.split_once(['_', '-'])?;
        let country = rest.split(['_', '-']).find(|subtag| subtag.len() == 2)?;

        let valid = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
        if !valid(language) || !valid(country) {
            return None;
        }

        Some(Self::new(country, language))
    }

    /// Reads the locale from the environment, falling back to `US`/`en`.
    #[must_use]
    pub fn from_env() -> Self {
        let detected = LOCALE_ENV_VARS.iter().find_map(|var| {
            std::env::var(var)
                .ok()
                .filter(|value| !value.is_empty())
                .and_then(|value| Self::parse(&value))
        });

        match detected {
            Some(locale) => {
                debug!(%locale, "Detected locale from environment");
                locale
            }
            None => {
                debug!("No usable locale in environment, using default");
                Self::default()
            }
        }
    }

    /// Applies explicit overrides on top of this locale.
    #[must_use]
    pub fn with_overrides(self, country: Option<&str>, language: Option<&str>) -> Self {
        Self::new(
            country.unwrap_or(&self.country),
            language.unwrap_or(&self.language),
        )
    }

    /// Two-letter storefront country code, uppercase.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Language code, lowercase.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTRY, DEFAULT_LANGUAGE)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.language, self.country)
    }
}
