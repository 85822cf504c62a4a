//! Spawns the app on a random port with an injected store.
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Response};
use tokio::net::TcpListener;
use tracing::info;
use waitlist::{
    init_dbg_tracing,
    store::{self, KvStore, MemoryStore},
    App, AppState,
};

/// Trying to bind port 0 will trigger an OS scan for an available port
/// which will then be bound to the application.
const TEST_SOCK_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 0);

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: Client,
    pub store: MemoryStore,
}

impl TestApp {
    /// Serves the app backed by a fresh `MemoryStore`.
    pub async fn spawn() -> Result<Self> {
        let store = MemoryStore::new();
        let addr = spawn_with_store(Box::new(store.clone())).await?;

        Ok(TestApp {
            addr,
            http_client: Client::new(),
            store,
        })
    }

    pub async fn post_subscriptions(&self, body: impl Into<reqwest::Body>) -> Result<Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/subscribe", self.addr))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        Ok(res)
    }

    pub async fn post_subscriptions_json(&self, body: &serde_json::Value) -> Result<Response> {
        self.post_subscriptions(body.to_string()).await
    }
}

/// A store where every write fails, counting the attempts.
#[derive(Clone, Default)]
pub struct FailingStore {
    pub attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl KvStore for FailingStore {
    async fn put(&self, _key: &str, _value: &str) -> store::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(store::Error::Redis(fred::error::Error::new(
            fred::error::ErrorKind::IO,
            "connection refused by redis.internal:6379",
        )))
    }
}

/// Set `TEST_LOG` to see the server logs while the tests run.
pub async fn spawn_with_store(store: Box<dyn KvStore>) -> Result<SocketAddr> {
    if std::env::var("TEST_LOG").is_ok() {
        init_dbg_tracing();
    }

    let listener = TcpListener::bind(TEST_SOCK_ADDR).await?;
    let addr = listener.local_addr()?;
    info!("Listening on {addr}");

    let app = App::new(AppState::new(store), listener);
    tokio::spawn(waitlist::serve(app));

    Ok(addr)
}
