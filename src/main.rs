//! covidash server
//!
//! Loads the dataset once, then serves the dashboard.
//!
//! Run with: cargo run --bin covidash -- [--config path/to/config.toml]
//!
//! See [`covidash::config`] for the environment overrides.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use covidash::config::{Config, LoggingConfig};

#[derive(Parser)]
#[command(name = "covidash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive COVID-19 dashboard for Brazil")]
struct Args {
    /// Config file (default: standard locations, then environment)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read the dataset from a local CSV instead of fetching it
    #[arg(long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    if let Some(file) = args.file {
        config.source.file = Some(file.display().to_string());
    }

    init_tracing(&config.logging);

    tracing::info!("Starting covidash v{}", env!("CARGO_PKG_VERSION"));

    let source = config.source.to_source();
    covidash::api::run(&source, config.api)
        .await
        .with_context(|| format!("serving dashboard for {}", source.location()))?;

    tracing::info!("covidash stopped");
    Ok(())
}

/// Initialize the global tracing subscriber
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.default_directive().into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
