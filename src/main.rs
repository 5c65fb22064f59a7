//! CLI entry point for the PDF scraper.

use anyhow::Result;
use pdf_scraper::{HttpClient, run};
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::{apply_config_defaults, load_default_file_config};
use cli::parse_cli_with_sources;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let (args, cli_sources) = parse_cli_with_sources();

    let loaded = load_default_file_config()?;
    let args = apply_config_defaults(args, &cli_sources, loaded.config.as_ref());

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(
        ?args,
        config_path = ?loaded.path,
        from_file = loaded.config.is_some(),
        "configuration resolved"
    );
    info!("PDF scraper starting");

    let config = args.to_config();
    let client = HttpClient::with_download_timeout(config.download_timeout)?;

    let summary = run(&client, &config).await;
    debug!(total = summary.total(), "run finished");

    Ok(())
}
