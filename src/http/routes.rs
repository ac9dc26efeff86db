//! Info, health and fallback endpoints. None of these touch the upstream.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::http::server::AppState;

/// The endpoints advertised by `/` and the 404 fallback.
pub const ENDPOINTS: [&str; 3] = ["GET /", "GET /health", "GET /api/vehicle/:plateNumber"];

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub description: &'static str,
    pub endpoints: [&'static str; 3],
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct RouteNotFound {
    pub success: bool,
    pub message: &'static str,
    pub available_endpoints: [&'static str; 3],
}

pub async fn get_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        description: "Vehicle plate lookup relay for the open-data vehicle registry",
        endpoints: ENDPOINTS,
    })
}

pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        uptime_secs: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFound {
            success: false,
            message: "endpoint not found",
            available_endpoints: ENDPOINTS,
        }),
    )
}
