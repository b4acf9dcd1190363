use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use appshelf::application::{AppsViewModel, AppsViewOptions, LoadAppsUseCase};
use appshelf::infrastructure::{AppConfig, CliArgs, IconLoader, ItunesClient, MemoryImageCache};
use appshelf::presentation::{Runner, TextRenderer};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let path = args.config.clone().or_else(AppConfig::default_config_path);
    let mut config = match path {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(version = appshelf::VERSION, "Starting {}", appshelf::NAME);

    let request = args
        .request()
        .ok_or_else(|| eyre!("one of --developer-id, --app-ids or --search is required"))?;

    let locale = config.locale.resolve();
    info!(%locale, %request, "Resolved storefront");

    let client = ItunesClient::with_base_url(
        config.catalog.base_url.clone(),
        locale,
        Duration::from_secs(config.catalog.timeout_secs),
    )?;
    let use_case = LoadAppsUseCase::new(Arc::new(client), config.device.to_context());

    let mut options = AppsViewOptions::default();
    if config.view.show_incompatible_apps {
        options = options.with_incompatible_apps();
    }
    if let Some(title) = &config.view.title {
        options = options.with_loaded_title(title.clone());
    }

    let view_model = AppsViewModel::new(request, options, use_case);
    let mut runner = Runner::new(view_model, TextRenderer::stdout());

    let cache = Arc::new(MemoryImageCache::with_capacity(config.image.cache_capacity));
    if args.icons {
        runner = runner.with_icons(IconLoader::new(cache.clone())?);
    }

    let state = runner.run().await?;

    if args.icons {
        info!(stats = %cache.stats(), "Icon cache");
    }

    if let Some(error) = state.error() {
        return Err(eyre!("failed to load apps: {error}"));
    }
    Ok(())
}
