//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader only handles presence and parsing)
//! - Validate value ranges (port > 0, timeouts > 0)
//! - Keep the database connect timeout inside the request timeout
//! - Check the collector endpoint and bind address are usable

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{key} must be a number, got {value:?}")]
    NotANumber { key: &'static str, value: String },
    #[error("database port must be non-zero")]
    ZeroPort,
    #[error("OTLP endpoint {value:?} is not an http(s) URL: {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("bind address {0:?} is not a socket address")]
    InvalidBindAddress(String),
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
    #[error(
        "database connect timeout ({connect}s) must be non-zero and shorter than the request timeout ({request}s)"
    )]
    ConnectTimeout { connect: u64, request: u64 },
    #[error("unknown log format {0:?} (expected \"pretty\" or \"json\")")]
    UnknownLogFormat(String),
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.database.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if let Err(reason) = check_endpoint(&config.telemetry.otlp_endpoint) {
        errors.push(ValidationError::InvalidEndpoint {
            value: config.telemetry.otlp_endpoint.clone(),
            reason,
        });
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let connect = config.database.connect_timeout_secs;
    let request = config.listener.request_timeout_secs;
    if connect == 0 || connect >= request {
        errors.push(ValidationError::ConnectTimeout { connect, request });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_endpoint(endpoint: &str) -> Result<(), String> {
    let url = Url::parse(endpoint).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DatabaseConfig, ListenerConfig, TelemetryConfig};

    fn config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                host: "localhost".into(),
                name: "app".into(),
                user: "app".into(),
                password: "app".into(),
                port: 5432,
                connect_timeout_secs: 5,
            },
            telemetry: TelemetryConfig::default(),
            listener: ListenerConfig::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&config()), Ok(()));
    }

    #[test]
    fn test_endpoint_scheme_checked() {
        let mut cfg = config();
        cfg.telemetry.otlp_endpoint = "grpc://collector:4317".into();
        let errors = validate_config(&cfg).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidEndpoint { .. }));

        cfg.telemetry.otlp_endpoint = "collector:4318".into();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_ranges_checked() {
        let mut cfg = config();
        cfg.database.port = 0;
        cfg.listener.request_timeout_secs = 0;
        cfg.listener.bind_address = "everywhere".into();

        let errors = validate_config(&cfg).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::ZeroPort,
                ValidationError::InvalidBindAddress("everywhere".into()),
                ValidationError::ZeroTimeout,
                ValidationError::ConnectTimeout {
                    connect: 5,
                    request: 0
                },
            ]
        );
    }

    #[test]
    fn test_connect_timeout_must_fit_request_timeout() {
        let mut cfg = config();
        cfg.database.connect_timeout_secs = 30;
        assert_eq!(
            validate_config(&cfg),
            Err(vec![ValidationError::ConnectTimeout {
                connect: 30,
                request: 30
            }])
        );

        cfg.database.connect_timeout_secs = 0;
        assert!(validate_config(&cfg).is_err());

        cfg.database.connect_timeout_secs = 29;
        assert_eq!(validate_config(&cfg), Ok(()));
    }
}
