//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize optional subsystems (metrics exporter)
//! - Build the HTTP server and its upstream client
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: a bad upstream URL or an occupied port is fatal
//! - The listener binds last, so traffic only arrives once everything is ready

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_listener;
use crate::lookup::upstream::ClientSetupError;
use crate::observability::metrics;

/// Process-fatal startup and serving failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Client(#[from] ClientSetupError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind the configured listener address.
pub async fn bind(config: &RelayConfig) -> Result<TcpListener, StartupError> {
    let address = config.listener.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })
}

/// Start every subsystem and serve until a termination signal arrives.
pub async fn run(config: RelayConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone())?;
    let listener = bind(&config).await?;
    let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_listener(shutdown);

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
