//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the request logger from the resolved configuration
//! - Create the Axum router with the transport context middleware
//! - Serve on a listener until Ctrl+C
//! - Swap in a rebuilt logger whenever the config is reloaded

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::app::{self, AppState};
use crate::config::loader::ResolvedConfig;
use crate::config::watcher::spawn_reloader;
use crate::interceptor::RequestLogger;

/// HTTP server hosting the items API.
pub struct HttpServer {
    router: Router,
    logger: Arc<ArcSwap<RequestLogger>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ResolvedConfig) -> Self {
        let sink = config.service.request_logger.sink.build();
        let logger = Arc::new(ArcSwap::from_pointee(RequestLogger::new(config.logging, sink)));
        let router = app::router(AppState::new(logger.clone()));
        Self { router, logger }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Snapshots arriving on `config_updates` replace the logger in place.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<ResolvedConfig>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reloader = spawn_reloader(self.logger.clone(), config_updates);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
