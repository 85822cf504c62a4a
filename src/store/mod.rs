//! The key-value store the subscriptions get written into.
//!
//! The web layer only ever sees a `Box<dyn KvStore>`, so the backend is picked once at startup
//! from `StoreConfig` and tests can swap in a `MemoryStore`.

mod error;
mod memory;
mod redis;

use async_trait::async_trait;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use redis::RedisStore;

use crate::config::{StoreBackend, StoreConfig};

/// Write access to an external key-value store.
///
/// Implementations must give last-writer-wins semantics per key.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn put(&self, key: &str, value: &str) -> Result<()>;
}

/// Builds the backend selected in the config.
pub async fn init_store(config: &StoreConfig) -> Result<Box<dyn KvStore>> {
    let store: Box<dyn KvStore> = match config.backend {
        StoreBackend::Redis => Box::new(RedisStore::init(config).await?),
        StoreBackend::Memory => {
            tracing::warn!(
                "{:<20} - Using the in-memory store, subscriptions will not survive a restart",
                "init_store"
            );
            Box::new(MemoryStore::new())
        }
    };

    Ok(store)
}
