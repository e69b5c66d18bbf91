//! Request identification and request spans.
//!
//! # Responsibilities
//! - Generate a UUID request ID when the caller did not send one
//! - Open one server span per request, named after the matched route
//! - Continue the caller's trace when a W3C `traceparent` header is present
//! - Record the response status on the span
//!
//! # Design Decisions
//! - Request ID added as early as possible so the span can carry it
//! - Unmatched requests use the raw path as the route

use std::time::Duration;

use axum::extract::MatchedPath;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request, Response};
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::{MakeSpan, OnResponse};
use tracing::{field, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates `x-request-id` values as UUID v4 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Creates the server span for an inbound request.
#[derive(Debug, Clone, Default)]
pub struct HttpMakeSpan {
    propagator: TraceContextPropagator,
}

impl<B> MakeSpan<B> for HttpMakeSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let method = request.method();
        let path = request.uri().path();
        let route = request
            .extensions()
            .get::<MatchedPath>()
            .map(MatchedPath::as_str)
            .unwrap_or(path);
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");

        let span = tracing::info_span!(
            "http.request",
            otel.name = %format!("{} {}", method, route),
            otel.kind = "server",
            http.request.method = %method,
            http.route = %route,
            url.path = %path,
            request_id = %request_id,
            http.response.status_code = field::Empty,
            otel.status_code = field::Empty,
        );

        let parent = self
            .propagator
            .extract(&HeaderExtractor(request.headers()));
        span.set_parent(parent);
        span
    }
}

/// Records the outcome of a request on its span.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpOnResponse;

impl<B> OnResponse<B> for HttpOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        let status = response.status();
        span.record("http.response.status_code", status.as_u16());
        if status.is_server_error() {
            span.record("otel.status_code", "ERROR");
        }

        tracing::info!(
            parent: span,
            status = status.as_u16(),
            latency_ms = latency.as_secs_f64() * 1000.0,
            "Request completed"
        );
    }
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
