//! In-process registration store.
//!
//! Used by tests and for running the HTTP surface without a database.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::store::{NewRegistration, Registration, RegistrationStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Registration>>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails as if the database were down.
    pub fn offline() -> Self {
        Self {
            rows: Mutex::default(),
            offline: true,
        }
    }

    /// Snapshot of the stored rows in insertion order.
    pub async fn rows(&self) -> Vec<Registration> {
        self.rows.lock().await.clone()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.check_online()
    }

    async fn insert(&self, registration: NewRegistration) -> Result<Registration, StoreError> {
        self.check_online()?;

        let mut rows = self.rows.lock().await;
        let id = rows.last().map_or(1, |row| row.id + 1);
        let row = Registration {
            id,
            full_name: registration.full_name,
            email: registration.email,
            created_at: chrono::Utc::now().naive_utc(),
        };
        rows.push(row.clone());
        Ok(row)
    }
}
