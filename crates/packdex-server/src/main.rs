//! packdex — digital sticker-album and trading service. Entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// packdex sticker-album service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PACKDEX_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    packdex_telemetry::init_logging()?;

    info!("Starting packdex v{}", env!("CARGO_PKG_VERSION"));

    let config = packdex_server::AppConfig::load(args.config.as_deref())?;
    info!(
        catalog = %config.catalog.base_url,
        port = config.api.port,
        "Configuration loaded"
    );

    let app = packdex_server::Application::new(config)?;

    // One-time census load; falls back with a warning if the catalog is
    // unreachable.
    app.prime_census().await;

    app.run().await?;

    Ok(())
}
