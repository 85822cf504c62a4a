use async_trait::async_trait;
use fred::prelude::{ClientLike, Config, KeysInterface, Pool, ReconnectPolicy};
use fred::types::Builder;
use secrecy::ExposeSecret;
use tracing::info;

use super::{KvStore, Result};
use crate::config::StoreConfig;

/// Contains a redis connection pool that is cheaply cloneable
#[derive(Clone, Debug)]
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    pub async fn init(config: &StoreConfig) -> Result<Self> {
        info!("{:<20} - Initializing the REDIS client", "init_redis_store");
        let conf = Config::from_url(config.redis_uri.expose_secret())?;
        let connect_timeout = config.connect_timeout();

        let pool = Builder::from_config(conf)
            .with_connection_config(|conn| conn.connection_timeout = connect_timeout)
            .set_policy(reconnect_policy(config))
            .build_pool(config.pool_size.max(1))?;

        pool.init().await?;
        info!("{:<20} - Connected to REDIS", "init_redis_store");

        Ok(RedisStore { pool })
    }
}

/// Keep reconnecting forever, backing off exponentially from 100ms up to the configured maximum.
/// Without a policy a dropped connection is never re-established.
fn reconnect_policy(config: &StoreConfig) -> ReconnectPolicy {
    ReconnectPolicy::new_exponential(0, 100, config.reconnect_max_delay_millis, 2)
}

#[async_trait]
impl KvStore for RedisStore {
    async fn put(&self, key: &str, value: &str) -> Result<()> {
        self.pool
            .set::<(), _, _>(key, value, None, None, false)
            .await?;
        Ok(())
    }
}
