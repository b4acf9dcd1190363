use super::app_config::LogLevel;
use crate::domain::entities::{CatalogRequest, DeviceClass};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "appshelf",
    version,
    about = "Lists App Store apps by developer, app ids or search term",
    long_about = None
)]
#[command(group(
    ArgGroup::new("request")
        .required(true)
        .args(["developer_id", "app_ids", "search"])
))]
pub struct CliArgs {
    /// iTunes artist id of the developer whose apps to list.
    #[arg(long, value_name = "ID")]
    pub developer_id: Option<u64>,

    /// Comma-separated app ids to list.
    #[arg(long, value_name = "ID,...", value_delimiter = ',')]
    pub app_ids: Option<Vec<u64>>,

    /// App Store search term.
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Catalog API base URL.
    #[arg(long, value_name = "URL", env = "APPSHELF_BASE_URL")]
    pub base_url: Option<String>,

    /// Storefront country code.
    #[arg(long, value_name = "CC")]
    pub country: Option<String>,

    /// Storefront language code.
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// Device class to filter for.
    #[arg(long, value_enum)]
    pub device: Option<DeviceClass>,

    /// OS version to filter for.
    #[arg(long, value_name = "VERSION")]
    pub os_version: Option<String>,

    /// Bundle id of the host app, hidden from results.
    #[arg(long, value_name = "BUNDLE_ID")]
    pub host_bundle_id: Option<String>,

    /// Show apps that are incompatible with the device.
    #[arg(long)]
    pub show_incompatible: bool,

    /// Title to show instead of the derived one.
    #[arg(long)]
    pub title: Option<String>,

    /// Download app icons into the memory cache after loading.
    #[arg(long)]
    pub icons: bool,
}

impl CliArgs {
    /// Returns the catalog request selected on the command line.
    #[must_use]
    pub fn request(&self) -> Option<CatalogRequest> {
        if let Some(id) = self.developer_id {
            return Some(CatalogRequest::developer(id));
        }
        if let Some(ids) = &self.app_ids {
            return Some(CatalogRequest::app_ids(ids.iter().copied()));
        }
        self.search.as_ref().map(|term| CatalogRequest::search(term.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_ids_are_comma_separated() {
        let args = CliArgs::parse_from(["appshelf", "--app-ids", "1,2,2"]);
        assert_eq!(args.request(), Some(CatalogRequest::AppIds(vec![1, 2, 2])));
    }

    #[test]
    fn test_developer_and_search() {
        let args = CliArgs::parse_from(["appshelf", "--developer-id", "284417353"]);
        assert_eq!(args.request(), Some(CatalogRequest::Developer(284_417_353)));

        let args = CliArgs::parse_from(["appshelf", "--search", "radio apps"]);
        assert_eq!(args.request(), Some(CatalogRequest::search("radio apps")));
    }

    #[test]
    fn test_request_mode_required_and_exclusive() {
        assert!(CliArgs::try_parse_from(["appshelf"]).is_err());
        assert!(
            CliArgs::try_parse_from(["appshelf", "--developer-id", "1", "--search", "x"]).is_err()
        );
    }
}
