//! Schema initialization.

use crate::store::{RegistrationStore, StoreError};

pub const CREATE_REGISTRATIONS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS registrations (
    id SERIAL PRIMARY KEY,
    full_name TEXT NOT NULL,
    email TEXT NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// Ensure the registrations table exists.
///
/// Runs once at startup. There is no retry: a failure here is fatal.
pub async fn initialize(store: &dyn RegistrationStore) -> Result<(), StoreError> {
    tracing::info!("Ensuring registrations table exists");
    store.ensure_schema().await.map_err(|e| {
        tracing::error!(error = %e, "Schema initialization failed");
        e
    })?;
    tracing::info!("Registrations table ready");
    Ok(())
}
