//! PostgreSQL registration store.
//!
//! # Responsibilities
//! - Open one connection per operation and release it on every exit path
//! - Bound connection setup, handshake included, by the connect timeout
//! - Wrap connection setup and each statement in a client span
//! - Map driver errors onto [`StoreError`]

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::{field, Instrument, Span};

use crate::config::DatabaseConfig;
use crate::store::schema::CREATE_REGISTRATIONS_TABLE;
use crate::store::{BoxError, NewRegistration, Registration, RegistrationStore, StoreError};

const DB_SYSTEM: &str = "postgresql";

const INSERT_REGISTRATION: &str = "INSERT INTO registrations (full_name, email) \
     VALUES ($1, $2) RETURNING id, full_name, email, created_at";

pub struct PostgresStore {
    config: tokio_postgres::Config,
    host: String,
    port: u16,
    database: String,
    connect_timeout: Duration,
}

impl PostgresStore {
    pub fn new(config: &DatabaseConfig) -> Self {
        let connect_timeout = Duration::from_secs(config.connect_timeout_secs);
        let mut pg = tokio_postgres::Config::new();
        pg.host(&config.host)
            .port(config.port)
            .dbname(&config.name)
            .user(&config.user)
            .password(&config.password)
            .application_name(env!("CARGO_PKG_NAME"))
            .connect_timeout(connect_timeout);

        Self {
            config: pg,
            host: config.host.clone(),
            port: config.port,
            database: config.name.clone(),
            connect_timeout,
        }
    }

    async fn connect(&self) -> Result<ScopedConnection, StoreError> {
        let span = tracing::info_span!(
            "db.connect",
            otel.kind = "client",
            db.system = DB_SYSTEM,
            db.namespace = %self.database,
            server.address = %self.host,
            server.port = self.port,
            otel.status_code = field::Empty,
        );

        // The driver's own connect timeout stops at the TCP socket; a server
        // that accepts and then stalls the startup handshake needs this one.
        let connecting = tokio::time::timeout(self.connect_timeout, self.config.connect(NoTls));
        let (client, connection) = match connecting.instrument(span.clone()).await {
            Ok(Ok(pair)) => pair,
            Ok(Err(e)) => return Err(self.connect_failed(&span, Box::new(e))),
            Err(elapsed) => return Err(self.connect_failed(&span, Box::new(elapsed))),
        };

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "Database connection closed with error");
            }
        });

        Ok(ScopedConnection { client, driver })
    }

    fn connect_failed(&self, span: &Span, error: BoxError) -> StoreError {
        span.record("otel.status_code", "ERROR");
        tracing::warn!(
            parent: span,
            host = %self.host,
            port = self.port,
            error = %error,
            "Database connection failed"
        );
        StoreError::Unavailable(error)
    }

    fn statement_span(&self, statement: &str) -> Span {
        let operation = statement_category(statement);
        tracing::info_span!(
            "db.statement",
            otel.name = %format!("{} {}", operation, self.database),
            otel.kind = "client",
            db.system = DB_SYSTEM,
            db.namespace = %self.database,
            db.operation.name = %operation,
            db.query.text = statement,
            server.address = %self.host,
            server.port = self.port,
            db.duration_ms = field::Empty,
            otel.status_code = field::Empty,
            error.message = field::Empty,
        )
    }
}

#[async_trait]
impl RegistrationStore for PostgresStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        let connection = self.connect().await?;
        let result = traced(
            self.statement_span(CREATE_REGISTRATIONS_TABLE),
            connection.client.execute(CREATE_REGISTRATIONS_TABLE, &[]),
        )
        .await;
        connection.release().await;

        result.map(|_| ()).map_err(statement_error)
    }

    async fn insert(&self, registration: NewRegistration) -> Result<Registration, StoreError> {
        let connection = self.connect().await?;
        let result = traced(
            self.statement_span(INSERT_REGISTRATION),
            connection.client.query_one(
                INSERT_REGISTRATION,
                &[&registration.full_name, &registration.email],
            ),
        )
        .await;
        connection.release().await;

        let row = result.map_err(statement_error)?;
        Ok(Registration {
            id: row.try_get(0).map_err(statement_error)?,
            full_name: row.try_get(1).map_err(statement_error)?,
            email: row.try_get(2).map_err(statement_error)?,
            created_at: row.try_get(3).map_err(statement_error)?,
        })
    }
}

/// A connection that lives for one store operation.
///
/// The driver task ends once the client is dropped, so an early return
/// still closes the socket.
struct ScopedConnection {
    client: Client,
    driver: JoinHandle<()>,
}

impl ScopedConnection {
    async fn release(self) {
        let ScopedConnection { client, driver } = self;
        drop(client);
        if let Err(e) = driver.await {
            tracing::warn!(error = %e, "Database connection task failed");
        }
    }
}

/// Statement category used for span naming: the leading SQL keyword.
pub fn statement_category(statement: &str) -> String {
    statement
        .split_whitespace()
        .next()
        .map(str::to_ascii_uppercase)
        .unwrap_or_default()
}

async fn traced<T, F>(span: Span, operation: F) -> Result<T, tokio_postgres::Error>
where
    F: Future<Output = Result<T, tokio_postgres::Error>>,
{
    let started = Instant::now();
    let result = operation.instrument(span.clone()).await;
    span.record("db.duration_ms", started.elapsed().as_secs_f64() * 1000.0);
    if let Err(e) = &result {
        span.record("otel.status_code", "ERROR");
        span.record("error.message", field::display(e));
    }
    result
}

fn statement_error(e: tokio_postgres::Error) -> StoreError {
    if e.is_closed() {
        StoreError::Unavailable(Box::new(e))
    } else {
        StoreError::Statement(Box::new(e))
    }
}
