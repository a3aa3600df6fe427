//! Resource coordinator: sequences store and cache calls per operation.
//!
//! [`TaskResource`] owns no state of its own; it holds handles to the
//! [`TaskStore`], a [`CacheStore`] backend, and the shared
//! [`CacheStats`]. Per operation:
//!
//! - **List** and **Get one** are read-through: try the cache, on a hit
//!   return the cached payload verbatim, on a miss read the store and
//!   best-effort populate the cache.
//! - **Create** stores, then best-effort populates `task:<id>`.
//! - **Update** and **Delete** mutate the store, then explicitly delete
//!   `task:<id>` (best-effort) so the next read repopulates.
//!
//! The `all_tasks` snapshot key is never explicitly invalidated; it only
//! expires via its short TTL. That means a list can serve stale data for
//! up to five minutes after a mutation -- an accepted trade-off, kept
//! deliberately (see DESIGN.md), not a bug.
//!
//! There is also no ordering guarantee between a store write here and a
//! concurrent cache read elsewhere: another request can repopulate
//! `task:<id>` with now-stale data in the window between our store write
//! and our invalidation. That raciness is inherent to
//! explicit-invalidation caching.

use std::sync::Arc;

use crate::cache::{CacheStats, CacheStatus, CacheStore, Cached};
use crate::constants::{task_key, ALL_TASKS_KEY, ALL_TASKS_TTL, TASK_TTL};
use crate::error::TaskError;
use crate::store::TaskStore;
use crate::types::{Task, TaskDraft};

/// Coordinates the task store and the cache for each CRUD operation.
///
/// Shared via `Arc` from the HTTP state. All dependencies are injected
/// at construction; there are no ambient globals.
pub struct TaskResource {
    store: Arc<TaskStore>,
    cache: Arc<dyn CacheStore>,
    stats: Arc<CacheStats>,
    cache_enabled: bool,
}

impl TaskResource {
    /// Creates a coordinator over the given store and cache backend.
    pub fn new(store: Arc<TaskStore>, cache: Arc<dyn CacheStore>, stats: Arc<CacheStats>) -> Self {
        Self {
            store,
            cache,
            stats,
            cache_enabled: true,
        }
    }

    /// Disables or enables the cache entirely (builder pattern). When
    /// disabled, every operation reports [`CacheStatus::Bypass`] and the
    /// backend is never called.
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Lists all tasks as a serialized JSON array.
    ///
    /// On a cache hit the cached payload is returned verbatim. On a miss
    /// the snapshot is read from the store, serialized, and best-effort
    /// cached with the short snapshot TTL.
    ///
    /// # Errors
    ///
    /// [`TaskError::Serialization`] if encoding the snapshot fails.
    pub async fn list(&self) -> Result<Cached<String>, TaskError> {
        let (found, status) = self.cache_get(ALL_TASKS_KEY).await;
        if let Some(body) = found {
            return Ok(Cached::new(body, status));
        }

        let tasks = self.store.list_all();
        let body = serde_json::to_string(&tasks)?;
        self.cache_put(ALL_TASKS_KEY, &body, ALL_TASKS_TTL).await;
        Ok(Cached::new(body, status))
    }

    /// Creates a task from the draft and returns the stored record,
    /// including its assigned id. Best-effort populates `task:<id>`.
    ///
    /// # Errors
    ///
    /// [`TaskError::Serialization`] if encoding the created record fails.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task, TaskError> {
        let task = self.store.add(draft);
        let body = serde_json::to_string(&task)?;
        self.cache_put(&task_key(task.id), &body, TASK_TTL).await;
        Ok(task)
    }

    /// Fetches a single task as serialized JSON, read-through.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotFound`] if no task exists at `id`;
    /// [`TaskError::Serialization`] if encoding the record fails.
    pub async fn get(&self, id: u64) -> Result<Cached<String>, TaskError> {
        let key = task_key(id);
        let (found, status) = self.cache_get(&key).await;
        if let Some(body) = found {
            return Ok(Cached::new(body, status));
        }

        let task = self.store.get(id).ok_or(TaskError::NotFound { id })?;
        let body = serde_json::to_string(&task)?;
        self.cache_put(&key, &body, TASK_TTL).await;
        Ok(Cached::new(body, status))
    }

    /// Replaces the task's fields at `id`, then explicitly invalidates
    /// `task:<id>` so the next read repopulates from the store. The
    /// `all_tasks` snapshot is left to expire by TTL.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotFound`] if no task exists at `id`.
    pub async fn update(&self, id: u64, draft: TaskDraft) -> Result<(), TaskError> {
        self.store
            .update(id, draft)
            .ok_or(TaskError::NotFound { id })?;
        self.cache_invalidate(&task_key(id)).await;
        Ok(())
    }

    /// Deletes the task at `id`, then explicitly invalidates `task:<id>`.
    /// The `all_tasks` snapshot is left to expire by TTL.
    ///
    /// # Errors
    ///
    /// [`TaskError::NotFound`] if no task exists at `id`.
    pub async fn delete(&self, id: u64) -> Result<(), TaskError> {
        if !self.store.delete(id) {
            return Err(TaskError::NotFound { id });
        }
        self.cache_invalidate(&task_key(id)).await;
        Ok(())
    }

    /// Cache lookup that can never fail the request: a backend error is
    /// recorded and treated as a miss.
    async fn cache_get(&self, key: &str) -> (Option<String>, CacheStatus) {
        if !self.cache_enabled {
            return (None, CacheStatus::Bypass);
        }
        match self.cache.get(key).await {
            Ok(Some(value)) => {
                self.stats.record_hit();
                (Some(value), CacheStatus::Hit)
            }
            Ok(None) => {
                self.stats.record_miss();
                (None, CacheStatus::Miss)
            }
            Err(error) => {
                self.stats.record_error();
                tracing::warn!(key, %error, "cache get failed, falling through to store");
                (None, CacheStatus::Error)
            }
        }
    }

    /// Best-effort cache population; failure is recorded and swallowed.
    async fn cache_put(&self, key: &str, value: &str, ttl: std::time::Duration) {
        if !self.cache_enabled {
            return;
        }
        if let Err(error) = self.cache.set(key, value, ttl).await {
            self.stats.record_error();
            tracing::warn!(key, %error, "cache set failed, continuing uncached");
        }
    }

    /// Best-effort explicit invalidation; on failure the entry is left to
    /// expire via its TTL.
    async fn cache_invalidate(&self, key: &str) {
        if !self.cache_enabled {
            return;
        }
        match self.cache.delete(key).await {
            Ok(()) => self.stats.record_invalidation(),
            Err(error) => {
                self.stats.record_error();
                tracing::warn!(key, %error, "cache delete failed, entry expires via TTL");
            }
        }
    }
}
