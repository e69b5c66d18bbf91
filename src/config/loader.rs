//! Configuration loading from the process environment.

use thiserror::Error;

use crate::config::schema::{
    AppConfig, DatabaseConfig, ListenerConfig, LogFormat, TelemetryConfig,
    DEFAULT_DB_CONNECT_TIMEOUT_SECS, DEFAULT_DB_PORT,
};
use crate::config::validation::{validate_config, ValidationError};

pub const DB_HOST: &str = "DB_HOST";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_CONNECT_TIMEOUT_SECS: &str = "DB_CONNECT_TIMEOUT_SECS";
pub const OTEL_SERVICE_NAME: &str = "OTEL_SERVICE_NAME";
pub const OTEL_SERVICE_NAMESPACE: &str = "OTEL_SERVICE_NAMESPACE";
pub const OTEL_ENVIRONMENT: &str = "OTEL_ENVIRONMENT";
pub const OTEL_EXPORTER_OTLP_ENDPOINT: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
pub const LOG_FORMAT: &str = "LOG_FORMAT";
pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("invalid configuration: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
pub fn from_env() -> Result<AppConfig, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

/// Load and validate configuration using `lookup` to resolve variables.
///
/// Only an absent variable counts as missing; an empty value is accepted
/// as-is.
pub fn load_with<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = Vec::new();
    let mut required = |key: &'static str| {
        lookup(key).unwrap_or_else(|| {
            missing.push(key);
            String::new()
        })
    };

    let host = required(DB_HOST);
    let name = required(DB_NAME);
    let user = required(DB_USER);
    let password = required(DB_PASSWORD);

    if !missing.is_empty() {
        return Err(ConfigError::Missing(missing));
    }

    let mut errors = Vec::new();

    let port = parse_or(&lookup, DB_PORT, DEFAULT_DB_PORT, &mut errors);
    let connect_timeout_secs = parse_or(
        &lookup,
        DB_CONNECT_TIMEOUT_SECS,
        DEFAULT_DB_CONNECT_TIMEOUT_SECS,
        &mut errors,
    );

    let telemetry_defaults = TelemetryConfig::default();
    let log_format = match lookup(LOG_FORMAT) {
        Some(value) => LogFormat::parse(&value).unwrap_or_else(|| {
            errors.push(ValidationError::UnknownLogFormat(value));
            LogFormat::default()
        }),
        None => telemetry_defaults.log_format,
    };
    let telemetry = TelemetryConfig {
        service_name: lookup(OTEL_SERVICE_NAME).unwrap_or(telemetry_defaults.service_name),
        service_namespace: lookup(OTEL_SERVICE_NAMESPACE)
            .unwrap_or(telemetry_defaults.service_namespace),
        environment: lookup(OTEL_ENVIRONMENT).unwrap_or(telemetry_defaults.environment),
        otlp_endpoint: lookup(OTEL_EXPORTER_OTLP_ENDPOINT)
            .unwrap_or(telemetry_defaults.otlp_endpoint),
        log_format,
    };

    let listener_defaults = ListenerConfig::default();
    let listener = ListenerConfig {
        bind_address: lookup(BIND_ADDRESS).unwrap_or(listener_defaults.bind_address),
        request_timeout_secs: parse_or(
            &lookup,
            REQUEST_TIMEOUT_SECS,
            listener_defaults.request_timeout_secs,
            &mut errors,
        ),
        max_body_bytes: parse_or(
            &lookup,
            MAX_BODY_BYTES,
            listener_defaults.max_body_bytes,
            &mut errors,
        ),
    };

    let config = AppConfig {
        database: DatabaseConfig {
            host,
            name,
            user,
            password,
            port,
            connect_timeout_secs,
        },
        telemetry,
        listener,
    };

    if let Err(mut semantic) = validate_config(&config) {
        errors.append(&mut semantic);
    }
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }

    Ok(config)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T, errors: &mut Vec<ValidationError>) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            errors.push(ValidationError::NotANumber { key, value });
            default
        }),
        None => default,
    }
}
