//! The vehicle lookup handler.
//!
//! validate → normalize → call upstream → map → respond. One upstream
//! attempt per request, no retries, nothing shared between requests
//! beyond the client's connection pool.

use std::time::Instant;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::HeaderMap,
};
use serde_json::Value;

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::lookup::outcome::LookupOutcome;
use crate::lookup::plate::{PlateError, PlateQuery};
use crate::observability::metrics;

/// `GET /api/vehicle/{plate}`
pub async fn lookup_vehicle(
    State(state): State<AppState>,
    headers: HeaderMap,
    plate: Result<Path<String>, PathRejection>,
) -> LookupOutcome {
    let request_id = request_id(&headers);
    match plate {
        Ok(Path(raw)) => run_lookup(&state, &request_id, Some(&raw)).await,
        Err(rejection) => {
            tracing::debug!(request_id = %request_id, error = %rejection, "Unreadable plate segment");
            finish(&state, &request_id, None, LookupOutcome::Invalid(PlateError::Missing), Instant::now())
        }
    }
}

/// `GET /api/vehicle` and `GET /api/vehicle/`, i.e. no plate at all.
pub async fn lookup_missing_plate(State(state): State<AppState>, headers: HeaderMap) -> LookupOutcome {
    let request_id = request_id(&headers);
    run_lookup(&state, &request_id, None).await
}

async fn run_lookup(state: &AppState, request_id: &str, raw: Option<&str>) -> LookupOutcome {
    let start = Instant::now();

    let outcome = match PlateQuery::parse(raw) {
        Err(e) => LookupOutcome::Invalid(e),
        Ok(plate) => {
            tracing::debug!(request_id = %request_id, plate = %plate, "Looking up vehicle");
            match state.upstream.search(&plate).await {
                Ok(records) => LookupOutcome::from_records(records),
                Err(e) => e.into(),
            }
        }
    };

    finish(state, request_id, raw, outcome, start)
}

fn finish(
    state: &AppState,
    request_id: &str,
    raw: Option<&str>,
    outcome: LookupOutcome,
    start: Instant,
) -> LookupOutcome {
    let plate = raw.unwrap_or("");
    let status = outcome.status();

    match &outcome {
        LookupOutcome::Found(record) => {
            let vehicle_id = record_id(record, &state.id_field);
            tracing::info!(
                request_id = %request_id,
                plate = %plate,
                vehicle_id = %vehicle_id,
                outcome = outcome.label(),
                "Vehicle found"
            );
        }
        LookupOutcome::NotFound => {
            tracing::info!(request_id = %request_id, plate = %plate, outcome = outcome.label(), "Vehicle not found");
        }
        LookupOutcome::Invalid(reason) => {
            tracing::info!(request_id = %request_id, plate = %plate, outcome = outcome.label(), reason = %reason, "Rejected plate");
        }
        LookupOutcome::UpstreamError(err) => {
            tracing::warn!(
                request_id = %request_id,
                plate = %plate,
                outcome = outcome.label(),
                status = status.as_u16(),
                error = %err,
                "Upstream lookup failed"
            );
        }
        LookupOutcome::InternalError(detail) => {
            tracing::error!(request_id = %request_id, plate = %plate, outcome = outcome.label(), error = %detail, "Lookup failed");
        }
    }

    metrics::record_lookup(outcome.label(), status.as_u16(), start);
    outcome
}

/// Render the identifier field of a record for logging.
fn record_id(record: &Value, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
