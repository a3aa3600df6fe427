//! Cache trait, backends, and observability counters.
//!
//! The cache is a side-channel accelerator, never a source of truth. The
//! [`CacheStore`] trait exposes three operations over opaque text
//! payloads: get, set-with-TTL, and delete. Backends:
//!
//! - [`RedisCache`] -- external Redis over a multiplexed connection.
//! - [`MemoryCache`] -- in-process fallback, also used by unit tests.
//!
//! Failure of any cache operation must never fail the overall request.
//! The coordinator enforces that; [`CacheStats`] makes the swallowing
//! observable so tests can assert "the failure was seen" instead of
//! scraping log output.

pub mod memory;
pub mod redis;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

use crate::error::CacheError;

/// Key-value cache over opaque text payloads.
///
/// The adapter never interprets value contents. `get` distinguishes a
/// miss (`Ok(None)`) from a backend failure (`Err`); callers treat both
/// as a miss, but only the latter is an observed error.
///
/// Implementations must be `Send + Sync`; the underlying client is
/// shared by many concurrent request handlers.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Retrieves the value stored at `key`, or `None` on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] on I/O or backend failure.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` at `key` with the given time-to-live.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] on I/O or backend failure.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Deletes the entry at `key`. Deleting an absent key is not an
    /// error (idempotent delete).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Backend`] on I/O or backend failure.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// How the cache participated in serving a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Value was served from the cache.
    Hit,
    /// Cache was consulted and had no entry; value came from the store.
    Miss,
    /// Cache was not consulted (disabled).
    Bypass,
    /// Cache operation failed; value came from the store (fail-open).
    Error,
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
            Self::Bypass => write!(f, "BYPASS"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A value paired with the cache status it was served under.
#[derive(Debug, Clone)]
pub struct Cached<T> {
    /// The served value.
    pub value: T,
    /// How the cache participated.
    pub status: CacheStatus,
}

impl<T> Cached<T> {
    /// Pairs a value with a cache status.
    pub fn new(value: T, status: CacheStatus) -> Self {
        Self { value, status }
    }
}

/// Atomic counters recording cache behavior.
///
/// Shared via `Arc` between the coordinator and whoever wants to observe
/// it (tests, a future metrics endpoint). This is the structured
/// replacement for the print-on-failure pattern: a swallowed cache
/// failure always increments `errors`, so tests assert on counters
/// rather than console text.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    errors: AtomicU64,
    invalidations: AtomicU64,
}

impl CacheStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of cache hits observed.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of cache misses observed.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of swallowed cache failures.
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Number of explicit invalidations that reached the backend.
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_status_display() {
        assert_eq!(CacheStatus::Hit.to_string(), "HIT");
        assert_eq!(CacheStatus::Miss.to_string(), "MISS");
        assert_eq!(CacheStatus::Bypass.to_string(), "BYPASS");
        assert_eq!(CacheStatus::Error.to_string(), "ERROR");
    }

    #[test]
    fn stats_start_at_zero_and_count_up() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
        assert_eq!(stats.errors(), 0);
        assert_eq!(stats.invalidations(), 0);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_error();
        stats.record_invalidation();

        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.errors(), 1);
        assert_eq!(stats.invalidations(), 1);
    }
}
