//! Redis cache backend.
//!
//! [`RedisCache`] implements [`CacheStore`] over a Redis instance using
//! plain `GET` / `SET EX` / `DEL`. Values are stored as serialized JSON
//! text; the backend never interprets them.
//!
//! # Connection Model
//!
//! The backend holds a [`MultiplexedConnection`], which clones cheaply --
//! all clones share one TCP connection and are safe for concurrent use.
//! Each method clones the connection for the call.
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskserve::RedisCache;
//!
//! # async fn example() {
//! let cache = RedisCache::connect("redis://127.0.0.1:6379").await.unwrap();
//! # }
//! ```

use std::time::Duration;

use ::redis::aio::MultiplexedConnection;
use ::redis::AsyncCommands;
use async_trait::async_trait;

use crate::cache::CacheStore;
use crate::error::CacheError;

/// Redis-backed cache over opaque text payloads.
#[derive(Debug, Clone)]
pub struct RedisCache {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis at the given URL.
    ///
    /// The URL format is `redis://[:<password>@]<host>:<port>[/<db>]`.
    /// Fails fast if the connection cannot be established -- a service
    /// configured with Redis should not start without it, even though
    /// individual cache calls later fail open.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] if the client cannot be created or
    /// the connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = ::redis::Client::open(url)
            .map_err(|e| CacheError::backend("failed to create Redis client", e))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::backend("failed to connect to Redis", e))?;
        Ok(Self {
            conn,
            key_prefix: String::new(),
        })
    }

    /// Creates a cache with a pre-built multiplexed connection.
    pub fn with_connection(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: String::new(),
        }
    }

    /// Sets a key prefix (builder pattern).
    ///
    /// Useful for test isolation: each test run uses a unique prefix so
    /// runs cannot collide and no cleanup is needed.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn full_key(&self, key: &str) -> String {
        if self.key_prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.key_prefix, key)
        }
    }
}

/// Clamps a TTL to whole seconds, at least 1, for `SET EX`.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn map_redis_error(err: ::redis::RedisError, op: &str, key: &str) -> CacheError {
    CacheError::backend(format!("redis {op} failed for key {key}"), err)
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let full = self.full_key(key);
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(&full)
            .await
            .map_err(|e| map_redis_error(e, "GET", key))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let full = self.full_key(key);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&full, value, ttl_seconds(ttl))
            .await
            .map_err(|e| map_redis_error(e, "SET", key))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let full = self.full_key(key);
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(&full)
            .await
            .map_err(|e| map_redis_error(e, "DEL", key))?;
        Ok(())
    }
}
