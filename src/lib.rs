//! Vehicle plate lookup relay library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
