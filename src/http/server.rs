//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, panic capture)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown, bounded by a grace period

use std::any::Any;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{response::Response, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Notify};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::request::MakeRequestUuid;
use crate::http::response::Envelope;
use crate::http::routes;
use crate::lookup::handler::{lookup_missing_plate, lookup_vehicle};
use crate::lookup::outcome::INTERNAL_MESSAGE;
use crate::lookup::upstream::{ClientSetupError, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub id_field: Arc<str>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: &RelayConfig) -> Result<Self, ClientSetupError> {
        Ok(Self {
            upstream: UpstreamClient::new(&config.upstream)?,
            id_field: Arc::from(config.upstream.id_field.as_str()),
            started_at: Instant::now(),
        })
    }
}

/// HTTP server for the vehicle relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ClientSetupError> {
        let state = AppState::new(&config)?;
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(routes::get_info))
            .route("/health", get(routes::get_health))
            .route("/api/vehicle", get(lookup_missing_plate))
            .route("/api/vehicle/", get(lookup_missing_plate))
            .route("/api/vehicle/{plate}", get(lookup_vehicle))
            .fallback(routes::not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(CorsLayer::permissive())
                    .layer(CatchPanicLayer::custom(handle_panic))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Consume the server and hand back the fully layered router.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests then get at most
    /// `timeouts.shutdown_grace_secs` to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        tracing::info!(address = %addr, "HTTP server starting");

        let draining = Arc::new(Notify::new());
        let notify = draining.clone();
        let stop_accepting = async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received, draining in-flight requests");
            notify.notify_one();
        };

        let server = axum::serve(listener, self.router)
            .with_graceful_shutdown(stop_accepting)
            .into_future();

        let deadline = async move {
            draining.notified().await;
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = server => result?,
            _ = deadline => {
                tracing::warn!(grace_secs = grace.as_secs(), "Grace period elapsed, abandoning in-flight requests");
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Turn a handler panic into the internal-error envelope.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(error = %detail, "Handler panicked");
    Envelope::failure(INTERNAL_MESSAGE)
        .with_error(detail)
        .into_response_with(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
}
