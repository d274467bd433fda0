// ABOUTME: Entry point for the shutterd binary.
// ABOUTME: Parses CLI arguments, initializes tracing, and starts the HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use shutterd_capture::NokhwaSource;
use shutterd_server::{AppState, ShutterdConfig, create_router};

/// Camera capture daemon: HTTP-triggered still captures with a durable
/// event log and operational log.
#[derive(Debug, Parser)]
#[command(name = "shutterd", version)]
struct Args {
    /// Socket address to bind (overrides SHUTTERD_BIND)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Data root holding image-captures/ and logs/ (overrides SHUTTERD_HOME)
    #[arg(long)]
    home: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shutterd=debug,tower_http=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    let config = ShutterdConfig::from_env_with(args.bind, args.home)?;
    tracing::info!(home = %config.home.display(), bind = %config.bind, "shutterd starting up");

    let state = Arc::new(AppState::new(&config.home, NokhwaSource));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
