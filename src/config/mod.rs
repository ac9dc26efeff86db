//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! RELAY_CONFIG (optional TOML file)
//!     → loader.rs (parse & deserialize, or defaults)
//!     → env overrides (PORT, UPSTREAM_TIMEOUT_SECS)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the relay runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, RelayConfig, TimeoutConfig, UpstreamConfig};
pub use validation::{validate_config, ValidationError};
