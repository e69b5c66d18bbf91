//! Registration service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser                    ┌──────────────────────────────────────────────┐
//!     ───────────────────────────┼─▶ http::server (request id, span, timeout)   │
//!                                │        │                                     │
//!                                │        ▼                                     │
//!                                │   http::handlers ──▶ render (register.html)  │
//!                                │        │                                     │
//!                                │        ▼                                     │
//!                                │   store::postgres ──────────────────────────┼──▶ PostgreSQL
//!                                │                                              │
//!                                │   observability (fmt logs + OTLP spans) ────┼──▶ Collector
//!                                └──────────────────────────────────────────────┘
//! ```
//!
//! Configuration comes from the environment (`DB_*`, `OTEL_*`, `BIND_ADDRESS`).

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match registration_app::lifecycle::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("registration-app: {}", e);
            ExitCode::FAILURE
        }
    }
}
