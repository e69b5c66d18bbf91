//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use registration_app::config::ListenerConfig;
use registration_app::{AppState, HttpServer, MemoryStore, Shutdown};
use tokio::net::TcpListener;

/// A registration server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the HTTP surface backed by `store`.
pub async fn start_server(store: MemoryStore) -> TestServer {
    let store = Arc::new(store);
    let state = AppState::new(store.clone()).unwrap();
    let server = HttpServer::new(state, &ListenerConfig::default());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let stop = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, stop).await;
    });

    TestServer {
        addr,
        store,
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
