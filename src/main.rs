//! Items service with request logging.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ transport context ──▶ controller call site ──▶ service call site
//!                     (method + URI)        before / after-return    after-throw / timed
//!                                                   │                       │
//!                                                   ▼                       ▼
//!                                           ┌──────────────────────────────────┐
//!                                           │ severity policy → render → emit  │
//!                                           └──────────────────────────────────┘
//!                                                           │
//!                                                           ▼
//!                                                   tracing subscriber
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use request_logger::config::loader::{self, ResolvedConfig};
use request_logger::config::watcher::ConfigWatcher;
use request_logger::observability::init_logging;
use request_logger::HttpServer;

#[derive(Parser)]
#[command(name = "request-logger")]
#[command(about = "Items service instrumented with the request logger", long_about = None)]
struct Cli {
    /// TOML config file. Without one, defaults plus REQUEST_LOGGER_* env apply.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the config file when it changes.
    #[arg(short, long, requires = "config")]
    watch: bool,
}

fn resolve_config(cli: &Cli) -> Result<ResolvedConfig, loader::ConfigError> {
    match &cli.config {
        Some(path) => loader::load_config(path),
        None => loader::resolve("", |name| std::env::var(name).ok()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Invalid config stops startup before anything is logged through it.
    let config = resolve_config(&cli)?;
    init_logging(&config.service.observability);

    tracing::info!("request-logger v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.service.listener.bind_address,
        enabled = config.logging.enabled(),
        logging_level = %config.logging.level(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.service.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Keep the watcher alive for as long as the server runs.
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => (None, mpsc::unbounded_channel().1),
    };

    let server = HttpServer::new(config);
    server.run(listener, config_updates).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
