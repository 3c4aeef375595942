// File: src/bin/tui.rs
use anyhow::{Context, Result};
use clap::Parser;
use showbill::config::{Config, ENV_API_URL};
use showbill::route::Route;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "showbill", version, about = "Browse comedy shows and email guests")]
struct Cli {
    /// Where to start: `/`, `/?status=past`, `/shows/<id>` or `/tickets`
    #[arg(default_value = "/")]
    route: String,

    /// Backend base URL (overrides the config file and environment)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Read this config file instead of the platform default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "LEVEL",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = showbill::logging::init(cli.log_level.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?
            .with_api_url_override(std::env::var(ENV_API_URL).ok()),
        None => Config::load()?,
    }
    .with_api_url_override(cli.api_url);

    let route: Route = cli.route.parse().context("Invalid start route")?;

    log::info!("Starting at {} against {}", route, config.api_url);
    if let Some(path) = log_file {
        log::debug!("Logging to {}", path.display());
    }

    showbill::tui::run(config, route).await
}
