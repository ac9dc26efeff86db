//! Vehicle plate lookup relay.
//!
//! Forwards `GET /api/vehicle/{plate}` to the open-data vehicle registry
//! and answers with a uniform JSON envelope.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request           ┌──────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ http::server (request id, trace, cors,     │
//!                              │               timeout, catch-panic)          │
//!                              │        │                                     │
//!                              │        ▼                                     │
//!                              │  lookup::handler ─▶ plate ─▶ upstream ───────┼──▶ open-data API
//!                              │        │                                     │
//!     Client Response          │        ▼                                     │
//!     ◀────────────────────────┼── lookup::outcome → http::response::Envelope │
//!                              │                                              │
//!                              │  config · lifecycle · observability          │
//!                              └──────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use vehicle_relay::config::resolve_config;
use vehicle_relay::lifecycle::startup;
use vehicle_relay::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("vehicle-relay: configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("vehicle-relay: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("vehicle-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream = %config.upstream.base_url,
        upstream_timeout_secs = config.upstream.timeout_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}
