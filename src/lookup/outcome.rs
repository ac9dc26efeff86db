//! Lookup outcomes and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::http::response::Envelope;
use crate::lookup::plate::{PlateError, INVALID_PLATE_MESSAGE};
use crate::lookup::upstream::UpstreamError;

pub const NOT_FOUND_MESSAGE: &str = "no vehicle found";
pub const API_ERROR_MESSAGE: &str = "API error";
pub const TIMEOUT_MESSAGE: &str = "upstream timeout";
pub const UPSTREAM_STATUS_MESSAGE: &str = "upstream error";
pub const NO_RESPONSE_MESSAGE: &str = "no response from upstream";
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Result of one pass through the lookup pipeline.
#[derive(Debug)]
pub enum LookupOutcome {
    /// The caller sent an unusable plate. Upstream was not called.
    Invalid(PlateError),
    /// First record returned by the upstream.
    Found(Value),
    /// Upstream succeeded with zero records.
    NotFound,
    /// The upstream call failed or reported failure.
    UpstreamError(UpstreamError),
    /// Anything else.
    InternalError(String),
}

impl From<UpstreamError> for LookupOutcome {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Malformed(detail) => LookupOutcome::InternalError(detail),
            other => LookupOutcome::UpstreamError(other),
        }
    }
}

impl LookupOutcome {
    /// Build an outcome from the upstream's record list.
    pub fn from_records(records: Vec<Value>) -> Self {
        match records.into_iter().next() {
            Some(record) => LookupOutcome::Found(record),
            None => LookupOutcome::NotFound,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            LookupOutcome::Invalid(_) => StatusCode::BAD_REQUEST,
            LookupOutcome::Found(_) | LookupOutcome::NotFound => StatusCode::OK,
            LookupOutcome::UpstreamError(err) => match err {
                UpstreamError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                UpstreamError::Status(status) => *status,
                UpstreamError::NoResponse(_) => StatusCode::SERVICE_UNAVAILABLE,
                UpstreamError::Rejected | UpstreamError::Malformed(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            LookupOutcome::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            LookupOutcome::Invalid(_) => "invalid",
            LookupOutcome::Found(_) => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::UpstreamError(_) => "upstream_error",
            LookupOutcome::InternalError(_) => "internal",
        }
    }

    pub fn into_envelope(self) -> Envelope {
        match self {
            LookupOutcome::Invalid(_) => Envelope::failure(INVALID_PLATE_MESSAGE),
            LookupOutcome::Found(record) => Envelope::data(record),
            LookupOutcome::NotFound => Envelope::failure(NOT_FOUND_MESSAGE),
            LookupOutcome::UpstreamError(err) => match err {
                UpstreamError::Timeout(_) => Envelope::failure(TIMEOUT_MESSAGE),
                UpstreamError::Status(status) => Envelope::failure(UPSTREAM_STATUS_MESSAGE)
                    .with_details(status.canonical_reason().unwrap_or("Unknown Status")),
                UpstreamError::NoResponse(_) => Envelope::failure(NO_RESPONSE_MESSAGE),
                UpstreamError::Rejected => Envelope::failure(API_ERROR_MESSAGE),
                UpstreamError::Malformed(detail) => {
                    Envelope::failure(INTERNAL_MESSAGE).with_error(detail)
                }
            },
            LookupOutcome::InternalError(detail) => {
                Envelope::failure(INTERNAL_MESSAGE).with_error(detail)
            }
        }
    }
}

impl IntoResponse for LookupOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        self.into_envelope().into_response_with(status)
    }
}
