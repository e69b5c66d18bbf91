//! Configuration schema definitions.
//!
//! Typed records produced by the loader. Every optional setting has a
//! `Default` so tests can build a config without touching the environment.

use std::fmt;

pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SERVICE_NAME: &str = "registration-app";
pub const DEFAULT_SERVICE_NAMESPACE: &str = "demo";
pub const DEFAULT_ENVIRONMENT: &str = "dev";
pub const DEFAULT_OTLP_ENDPOINT: &str =
    "http://adot-apm-collector.adot-system.svc.cluster.local:4318";

/// Root configuration for the registration service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Relational store connection settings.
    pub database: DatabaseConfig,

    /// Tracing and logging settings.
    pub telemetry: TelemetryConfig,

    /// HTTP listener settings.
    pub listener: ListenerConfig,
}

/// Database connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub port: u16,

    /// Upper bound on opening a connection, handshake included.
    pub connect_timeout_secs: u64,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("port", &self.port)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Tracing pipeline and logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Reported as `service.name`.
    pub service_name: String,

    /// Reported as `service.namespace`.
    pub service_namespace: String,

    /// Reported as `deployment.environment`.
    pub environment: String,

    /// Collector base URL, without the `/v1/traces` suffix.
    pub otlp_endpoint: String,

    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            service_namespace: DEFAULT_SERVICE_NAMESPACE.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            otlp_endpoint: DEFAULT_OTLP_ENDPOINT.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Total time allowed for one request in seconds.
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
        }
    }
}
