//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::entities::{DeviceClass, DeviceContext};
use crate::infrastructure::itunes::ITUNES_API_BASE;
use crate::infrastructure::locale::Locale;

const APP_NAME: &str = "appshelf";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "linuxmobile";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Errors reading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`AppConfig`].
    #[error("invalid config {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: toml::de::Error,
    },
}

/// Application configuration, loaded from TOML and overridden by CLI flags.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Catalog endpoint configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Storefront locale overrides.
    #[serde(default)]
    pub locale: LocaleConfig,

    /// Device the list is filtered for.
    #[serde(default)]
    pub device: DeviceConfig,

    /// List presentation options.
    #[serde(default)]
    pub view: ViewConfig,

    /// Icon cache configuration.
    #[serde(default)]
    pub image: ImageConfig,
}

/// Catalog endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Storefront locale overrides. Unset fields come from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Two-letter storefront country.
    #[serde(default)]
    pub country: Option<String>,

    /// Language code.
    #[serde(default)]
    pub language: Option<String>,
}

impl LocaleConfig {
    /// Resolves the effective locale.
    #[must_use]
    pub fn resolve(&self) -> Locale {
        Locale::from_env().with_overrides(self.country.as_deref(), self.language.as_deref())
    }
}

/// Device the list is filtered for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device class.
    #[serde(default)]
    pub class: DeviceClass,

    /// OS version compared against `minimumOsVersion`.
    #[serde(default = "default_os_version")]
    pub os_version: String,

    /// Bundle id of the embedding app, hidden from results.
    #[serde(default)]
    pub host_bundle_id: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            class: DeviceClass::default(),
            os_version: default_os_version(),
            host_bundle_id: None,
        }
    }
}

impl DeviceConfig {
    /// Builds the device context used for filtering.
    #[must_use]
    pub fn to_context(&self) -> DeviceContext {
        let context = DeviceContext::new(self.class, self.os_version.as_str());
        match &self.host_bundle_id {
            Some(bundle_id) => context.with_host_bundle_id(bundle_id),
            None => context,
        }
    }
}

/// List presentation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Show apps that cannot run on the configured device.
    #[serde(default)]
    pub show_incompatible_apps: bool,

    /// Title shown instead of the derived one.
    #[serde(default)]
    pub title: Option<String>,
}

/// Icon cache configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Maximum icons kept in memory. Unbounded when unset.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
}

fn default_base_url() -> String {
    ITUNES_API_BASE.to_string()
}

const fn default_timeout_secs() -> u64 {
    20
}

fn default_os_version() -> String {
    "17.0".to_string()
}

use super::args::CliArgs;

impl AppConfig {
    /// Loads the configuration file, or defaults if it does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config = Some(path.to_path_buf());
        Ok(config)
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.base_url {
            self.catalog.base_url.clone_from(base_url);
        }
        if let Some(country) = &args.country {
            self.locale.country = Some(country.clone());
        }
        if let Some(language) = &args.language {
            self.locale.language = Some(language.clone());
        }
        if let Some(class) = args.device {
            self.device.class = class;
        }
        if let Some(os_version) = &args.os_version {
            self.device.os_version.clone_from(os_version);
        }
        if let Some(bundle_id) = &args.host_bundle_id {
            self.device.host_bundle_id = Some(bundle_id.clone());
        }
        if args.show_incompatible {
            self.view.show_incompatible_apps = true;
        }
        if let Some(title) = &args.title {
            self.view.title = Some(title.clone());
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns effective config path.
    #[must_use]
    pub fn effective_config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(Self::default_config_path)
    }

    /// Returns the log file path, if logging to a file was requested.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone()
    }
}
