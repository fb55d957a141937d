//! Concierge REST API entry point.
//!
//! Binary name: `concierged`
//!
//! Parses CLI arguments, loads configuration and the persisted state, then
//! serves the HTTP API until Ctrl+C / SIGTERM. A final flush of every store
//! runs before exit, so an acknowledged mutation is never lost to a clean
//! shutdown.

mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "concierged", version, about = "Single-tenant chat assistant backend")]
struct Cli {
    /// Port for the HTTP listener (overrides config.toml).
    #[arg(long)]
    port: Option<u16>,

    /// Host/interface for the HTTP listener (overrides config.toml).
    #[arg(long)]
    host: Option<String>,

    /// Data directory (overrides CONCIERGE_DATA_DIR and the platform default).
    #[arg(long)]
    data_dir: Option<std::path::PathBuf>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,concierge_api=debug,concierge_core=debug,concierge_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let data_dir = cli
        .data_dir
        .unwrap_or_else(concierge_infra::paths::resolve_data_dir);
    let config = concierge_infra::config::load_server_config(&data_dir).await;

    // A failed startup load is fatal: durability cannot be guaranteed
    // without it.
    let state = AppState::init(data_dir.clone(), &config).await?;

    let host = cli.host.unwrap_or_else(|| config.host.clone());
    let port = cli.port.unwrap_or(config.port);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} Concierge API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!(
        "  {}",
        console::style(format!("data dir: {}", data_dir.display())).dim()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state.clone());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Acknowledged mutations must survive a clean shutdown.
    state.flush_all().await;
    println!("\n  Server stopped.");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
