//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span, trace context)
//!     → handlers.rs (health probe, registration form)
//!     → response.rs (error → status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::{HttpMakeSpan, HttpOnResponse, UuidRequestId, X_REQUEST_ID};
pub use response::AppError;
pub use server::{AppState, HttpServer};
