//! Cache key builders and TTL constants.
//!
//! The two key families mirror the two read paths: one snapshot key for
//! the whole collection, one key per task. The TTL asymmetry is
//! deliberate: the collection snapshot changes on every mutation and is
//! only ever expired by TTL, while individual entries live longer and are
//! invalidated explicitly on update/delete.

use std::time::Duration;

/// Cache key for the serialized snapshot of every task.
pub const ALL_TASKS_KEY: &str = "all_tasks";

/// TTL for the `all_tasks` snapshot. Short, because the snapshot is never
/// explicitly invalidated; expiry is its only consistency mechanism.
pub const ALL_TASKS_TTL: Duration = Duration::from_secs(5 * 60);

/// TTL for individual `task:<id>` entries. These are invalidated
/// explicitly on update/delete, so the TTL is only a backstop.
pub const TASK_TTL: Duration = Duration::from_secs(60 * 60);

/// Builds the cache key for a single task.
///
/// # Examples
///
/// ```
/// use taskserve::constants::task_key;
///
/// assert_eq!(task_key(7), "task:7");
/// ```
pub fn task_key(id: u64) -> String {
    format!("task:{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_key_format() {
        assert_eq!(task_key(1), "task:1");
        assert_eq!(task_key(12345), "task:12345");
    }

    #[test]
    fn snapshot_ttl_shorter_than_task_ttl() {
        assert!(ALL_TASKS_TTL < TASK_TTL);
    }
}
