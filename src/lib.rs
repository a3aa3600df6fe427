//! Task CRUD HTTP service with read-through Redis caching.
//!
//! This crate serves a single in-memory collection of task records over
//! HTTP, with an optional cache layer backed by an external key-value
//! store. The in-memory [`TaskStore`] is the sole source of truth; cache
//! entries are derived, disposable state that may vanish at any time
//! without affecting correctness, only latency.
//!
//! # Architecture
//!
//! - [`store::TaskStore`] -- lock-guarded map from id to task record.
//!   Reads share the lock, writes exclude everything. Ids are issued from
//!   a monotonic counter and never reused, even after deletion.
//! - [`cache::CacheStore`] -- async get / set-with-TTL / delete over an
//!   opaque text payload. Implemented by [`cache::RedisCache`] and
//!   [`cache::MemoryCache`]. Failures never fail a request.
//! - [`resource::TaskResource`] -- sequences store and cache calls per
//!   operation: read-through on reads, explicit invalidation of
//!   `task:<id>` on update/delete, TTL-only expiry for the `all_tasks`
//!   snapshot.
//! - [`http`] -- the axum router and error-to-status mapping.
//!
//! # Module Organization
//!
//! - [`types`] - Task wire/domain types
//! - [`store`] - authoritative in-memory store
//! - [`cache`] - cache trait, backends, and observability counters
//! - [`resource`] - the coordinator tying store and cache together
//! - [`http`] - HTTP surface
//! - [`config`] - environment-driven configuration
//! - [`error`] - typed errors
//! - [`constants`] - cache key builders and TTLs

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod resource;
pub mod store;
pub mod types;

// Re-exports for ergonomic access
pub use cache::{CacheStats, CacheStatus, CacheStore, Cached, MemoryCache, RedisCache};
pub use config::Config;
pub use error::{CacheError, TaskError};
pub use resource::TaskResource;
pub use store::TaskStore;
pub use types::{Task, TaskDraft};
