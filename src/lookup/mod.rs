//! Vehicle lookup subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/vehicle/{plate}
//!     → plate.rs (length check on raw input, strip non-digits)
//!     → upstream.rs (single GET: resource_id, q, limit; bounded timeout)
//!     → outcome.rs (Found / NotFound / UpstreamError / InternalError)
//!     → Envelope + status code
//! ```
//!
//! # Design Decisions
//! - Invalid plates never reach the upstream
//! - Zero records is `200` with `success: false`; the endpoint exists
//! - Non-2xx upstream statuses pass through to the caller unchanged

pub mod handler;
pub mod outcome;
pub mod plate;
pub mod upstream;

pub use outcome::LookupOutcome;
pub use plate::{PlateError, PlateQuery};
pub use upstream::{UpstreamClient, UpstreamError};
