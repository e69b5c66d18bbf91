//! Distributed tracing pipeline.
//!
//! # Responsibilities
//! - Describe this process with a resource (name, namespace, environment)
//! - Derive the OTLP/HTTP trace endpoint from the collector base URL
//! - Own the tracer provider and flush it on shutdown

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;

use crate::config::TelemetryConfig;
use crate::observability::TelemetryError;

/// Path appended to the collector base URL for span submission.
pub const TRACES_PATH: &str = "/v1/traces";

const EXPORT_TIMEOUT: Duration = Duration::from_secs(10);

/// Trace submission URL for a collector base URL.
pub fn traces_endpoint(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), TRACES_PATH)
}

/// Resource descriptor attached to every span from this process.
pub fn resource(config: &TelemetryConfig) -> Resource {
    Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes([
            KeyValue::new("service.namespace", config.service_namespace.clone()),
            KeyValue::new("deployment.environment", config.environment.clone()),
        ])
        .build()
}

pub(crate) fn tracer_provider(
    config: &TelemetryConfig,
) -> Result<SdkTracerProvider, TelemetryError> {
    let exporter = SpanExporter::builder()
        .with_http()
        .with_endpoint(traces_endpoint(&config.otlp_endpoint))
        .with_timeout(EXPORT_TIMEOUT)
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

/// Handle to the process tracing pipeline.
///
/// Dropping the handle also shuts the provider down, but [`Telemetry::shutdown`]
/// does it off the async workers and reports the outcome.
pub struct Telemetry {
    provider: SdkTracerProvider,
}

impl Telemetry {
    pub(crate) fn new(provider: SdkTracerProvider) -> Self {
        Self { provider }
    }

    /// Flush queued spans and stop the export worker.
    pub async fn shutdown(self) {
        let provider = self.provider;
        match tokio::task::spawn_blocking(move || provider.shutdown()).await {
            Ok(Ok(())) => tracing::info!("Tracing pipeline flushed"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Tracing pipeline shutdown failed"),
            Err(e) => tracing::warn!(error = %e, "Tracing pipeline shutdown task failed"),
        }
    }
}
