//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling and store calls produce `tracing` spans/events:
//!     → EnvFilter (RUST_LOG)
//!     → logging.rs (fmt layer, pretty or JSON, to stdout)
//!     → tracing.rs (tracing-opentelemetry bridge
//!                   → batch span processor
//!                   → OTLP/HTTP exporter → <collector>/v1/traces)
//! ```
//!
//! # Design Decisions
//! - The tracer provider is owned by [`Telemetry`], not registered globally
//! - Span export is batched on a background worker and best-effort
//! - Spans are created explicitly by middleware and store call sites

pub mod logging;
pub mod tracing;

use opentelemetry::trace::TracerProvider as _;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::TelemetryConfig;

pub use self::tracing::{traces_endpoint, Telemetry};

/// Instrumentation scope name for spans produced by this crate.
pub const TRACER_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP span exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Build the span pipeline and install the process subscriber.
///
/// Must run once, before the schema initializer and before the listener
/// accepts traffic. The returned handle has to be kept alive for the
/// lifetime of the process and shut down on exit so queued spans are
/// flushed.
pub fn init(config: &TelemetryConfig) -> Result<Telemetry, TelemetryError> {
    let provider = self::tracing::tracer_provider(config)?;
    let tracer = provider.tracer(TRACER_NAME);

    ::tracing_subscriber::registry()
        .with(logging::env_filter())
        .with(logging::fmt_layer(config.log_format))
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .try_init()?;

    ::tracing::info!(
        service_name = %config.service_name,
        service_namespace = %config.service_namespace,
        environment = %config.environment,
        endpoint = %traces_endpoint(&config.otlp_endpoint),
        "Tracing pipeline initialized"
    );

    Ok(Telemetry::new(provider))
}
