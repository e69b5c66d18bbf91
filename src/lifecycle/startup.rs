//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration from the environment
//! - Initialize the tracing pipeline before any database call
//! - Ensure the registrations table exists
//! - Bind the listener and serve until a termination signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, with no retry
//! - Spans are flushed on every exit path once tracing is up

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{self, AppConfig, ConfigError};
use crate::http::{AppState, HttpServer};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{self, TelemetryError};
use crate::render::RenderError;
use crate::store::{schema, PostgresStore, RegistrationStore, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("schema initialization failed: {0}")]
    Schema(#[from] StoreError),
    #[error("template setup failed: {0}")]
    Templates(#[from] RenderError),
    #[error("listener error on {address}: {source}")]
    Listener {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Run the service: bootstrap, serve until SIGINT/SIGTERM, then flush spans.
pub async fn run() -> Result<(), StartupError> {
    let config = config::from_env()?;
    let telemetry = observability::init(&config.telemetry)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.name,
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    let store: Arc<dyn RegistrationStore> = Arc::new(PostgresStore::new(&config.database));
    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_termination().await;
        signal_shutdown.trigger();
    });

    let result = serve(&config, store, &shutdown).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, "Service stopped with error");
    }

    telemetry.shutdown().await;
    result
}

/// Everything after tracing is up: schema, bind, serve.
pub async fn serve(
    config: &AppConfig,
    store: Arc<dyn RegistrationStore>,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let stop = shutdown.subscribe();
    schema::initialize(store.as_ref()).await?;

    let state = AppState::new(store)?;
    let server = HttpServer::new(state, &config.listener);

    let address = config.listener.bind_address.clone();
    let listener = match TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(source) => return Err(StartupError::Listener { address, source }),
    };

    server
        .run(listener, stop)
        .await
        .map_err(|source| StartupError::Listener { address, source })
}
