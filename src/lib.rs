//! Registration service library.
//!
//! Serves a single registration form, stores submissions in PostgreSQL,
//! answers a health probe, and ships request and database spans to an
//! OTLP/HTTP collector.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod store;

pub use config::AppConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use store::{MemoryStore, PostgresStore, RegistrationStore};
