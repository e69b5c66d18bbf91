//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (DB_*, OTEL_*, listener settings)
//!     → loader.rs (resolve variables, apply defaults)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → handed to observability, store and http at startup
//! ```
//!
//! # Design Decisions
//! - Config is resolved once; there is no reload
//! - Required database settings have no defaults; everything else does
//! - Validation separates presence (loader) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{from_env, load_with, ConfigError};
pub use schema::{AppConfig, DatabaseConfig, ListenerConfig, LogFormat, TelemetryConfig};
pub use validation::ValidationError;
