//! Error responses.
//!
//! # Responsibilities
//! - Map store, rendering and body failures to HTTP status codes
//! - Log the failure on the request span; keep the body generic

use axum::extract::rejection::RawFormRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::render::RenderError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to render page: {0}")]
    Render(#[from] RenderError),
    #[error("unreadable form body: {0}")]
    Form(#[from] RawFormRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(StoreError::Statement(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Form(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Form(rejection) = self {
            tracing::warn!(error = %rejection, "Rejected form submission");
            return rejection.into_response();
        }

        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self, "Request failed");

        let message = match status {
            StatusCode::SERVICE_UNAVAILABLE => "Service Unavailable",
            _ => "Internal Server Error",
        };
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let unavailable = AppError::Store(StoreError::Unavailable("refused".into()));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let statement = AppError::Store(StoreError::Statement("syntax error".into()));
        assert_eq!(statement.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            statement.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
