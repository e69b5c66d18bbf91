//! Registration persistence.
//!
//! # Data Flow
//! ```text
//! POST / handler
//!     → RegistrationStore::insert (one scoped connection per call)
//!     → registrations table (id, full_name, email, created_at)
//!
//! Startup:
//!     schema::initialize → RegistrationStore::ensure_schema
//! ```
//!
//! # Design Decisions
//! - The store owns persisted rows; the service keeps nothing in memory
//! - No pooling: each operation acquires and releases its own connection
//! - Rows are only ever inserted, never read back, updated or deleted

pub mod memory;
pub mod postgres;
pub mod schema;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection refused, timed out or dropped.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] BoxError),
    /// The statement itself failed.
    #[error("statement failed: {0}")]
    Statement(#[source] BoxError),
}

/// A submitted registration, before the store assigns identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub full_name: String,
    pub email: String,
}

/// A persisted registration row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Create the registrations table if it does not exist.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert one row and return it as stored.
    async fn insert(&self, registration: NewRegistration) -> Result<Registration, StoreError>;
}
