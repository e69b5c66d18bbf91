//! Route handlers.

use axum::extract::rejection::RawFormRejection;
use axum::extract::{RawForm, State};
use axum::response::Html;
use axum::Json;
use serde::Serialize;
use url::form_urlencoded;

use crate::http::response::AppError;
use crate::http::server::AppState;
use crate::render::RegisterPage;
use crate::store::NewRegistration;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Submitted registration form. Absent fields become empty strings.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
}

impl RegistrationForm {
    /// Parse an urlencoded body. When a field repeats, its first value wins;
    /// unknown fields are ignored.
    pub fn parse(body: &[u8]) -> Self {
        let mut full_name = None;
        let mut email = None;
        for (key, value) in form_urlencoded::parse(body) {
            let slot = match key.as_ref() {
                "full_name" => &mut full_name,
                "email" => &mut email,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            full_name: full_name.unwrap_or_default(),
            email: email.unwrap_or_default(),
        }
    }
}

/// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// GET /
pub async fn register_form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.register(&RegisterPage::form())?))
}

/// POST /
///
/// No validation: whatever was submitted is stored.
pub async fn register_submit(
    State(state): State<AppState>,
    form: Result<RawForm, RawFormRejection>,
) -> Result<Html<String>, AppError> {
    let form = match form {
        Ok(RawForm(body)) => RegistrationForm::parse(&body),
        Err(RawFormRejection::InvalidFormContentType(reason)) => {
            tracing::debug!(%reason, "Body is not a form, treating fields as absent");
            RegistrationForm::default()
        }
        Err(rejection) => return Err(rejection.into()),
    };

    let registration = state
        .store
        .insert(NewRegistration {
            full_name: form.full_name,
            email: form.email,
        })
        .await?;

    tracing::info!(registration_id = registration.id, "Registration stored");

    let page = RegisterPage::submitted(&registration.full_name);
    Ok(Html(state.templates.register(&page)?))
}
