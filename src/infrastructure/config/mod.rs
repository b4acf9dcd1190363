//! Application configuration.

pub mod app_config;
pub mod args;

pub use app_config::{
    AppConfig, CatalogConfig, ConfigError, DeviceConfig, ImageConfig, LocaleConfig, LogLevel,
    ViewConfig,
};
pub use args::CliArgs;
