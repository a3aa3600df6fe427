//! Authoritative in-memory task store.
//!
//! [`TaskStore`] owns the mapping from identifier to task record plus the
//! monotonic next-id counter, both guarded by a single
//! [`parking_lot::RwLock`]. Multiple concurrent reads proceed in
//! parallel; any write excludes all other access. This shared-read /
//! exclusive-write discipline makes every operation linearizable per
//! store instance and is the single correctness-critical property of the
//! whole service.
//!
//! The store is the sole source of truth. Cache state (see
//! [`cache`](crate::cache)) is derived from it and may be stale or absent
//! without affecting correctness.
//!
//! # Invariants
//!
//! - Every key in the map equals the `id` field of its value.
//! - The next-id counter is strictly greater than any id ever issued;
//!   ids are never reused, even after deletion.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::types::{Task, TaskDraft};

#[derive(Debug)]
struct StoreInner {
    tasks: HashMap<u64, Task>,
    next_id: u64,
}

/// Thread-safe in-memory store of task records.
///
/// Created once at process start and shared via `Arc`; lives for the
/// process lifetime.
///
/// # Examples
///
/// ```
/// use taskserve::{TaskDraft, TaskStore};
///
/// let store = TaskStore::new();
/// let task = store.add(TaskDraft {
///     title: "buy milk".to_string(),
///     completed: false,
/// });
/// assert_eq!(task.id, 1);
/// assert_eq!(store.get(1).unwrap().title, "buy milk");
/// ```
#[derive(Debug)]
pub struct TaskStore {
    inner: RwLock<StoreInner>,
}

impl TaskStore {
    /// Creates an empty store. The first assigned id is 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                tasks: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Assigns the next unused identifier to the draft, stores the
    /// record, and returns it. Never fails.
    pub fn add(&self, draft: TaskDraft) -> Task {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.next_id += 1;
        let task = Task::from_draft(id, draft);
        inner.tasks.insert(id, task.clone());
        task
    }

    /// Returns a copy of the record at `id`, if present.
    pub fn get(&self, id: u64) -> Option<Task> {
        self.inner.read().tasks.get(&id).cloned()
    }

    /// Replaces the record's fields at `id`, preserving the stored
    /// identifier. Returns the updated record, or `None` if no record
    /// exists at that id (the store is left unmodified). Never creates
    /// new identifiers.
    pub fn update(&self, id: u64, draft: TaskDraft) -> Option<Task> {
        let mut inner = self.inner.write();
        let slot = inner.tasks.get_mut(&id)?;
        *slot = Task::from_draft(id, draft);
        Some(slot.clone())
    }

    /// Removes the record at `id`. Returns `true` if it existed.
    pub fn delete(&self, id: u64) -> bool {
        self.inner.write().tasks.remove(&id).is_some()
    }

    /// Returns a snapshot copy of all current records. Order is
    /// unspecified; callers must not depend on insertion or id order.
    pub fn list_all(&self) -> Vec<Task> {
        self.inner.read().tasks.values().cloned().collect()
    }

    /// Returns the number of records stored.
    pub fn len(&self) -> usize {
        self.inner.read().tasks.len()
    }

    /// Returns `true` if the store contains no records.
    pub fn is_empty(&self) -> bool {
        self.inner.read().tasks.is_empty()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn add_assigns_sequential_ids_from_1() {
        let store = TaskStore::new();
        assert_eq!(store.add(draft("a")).id, 1);
        assert_eq!(store.add(draft("b")).id, 2);
        assert_eq!(store.add(draft("c")).id, 3);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let store = TaskStore::new();
        let a = store.add(draft("a"));
        let b = store.add(draft("b"));
        assert!(store.delete(a.id));
        assert!(store.delete(b.id));
        let c = store.add(draft("c"));
        assert_eq!(c.id, 3);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = TaskStore::new();
        assert!(store.get(999).is_none());
    }

    #[test]
    fn update_preserves_stored_id() {
        let store = TaskStore::new();
        let task = store.add(draft("original"));
        let updated = store
            .update(
                task.id,
                TaskDraft {
                    title: "renamed".to_string(),
                    completed: true,
                },
            )
            .unwrap();
        assert_eq!(updated.id, task.id);
        assert_eq!(updated.title, "renamed");
        assert!(updated.completed);
        assert_eq!(store.get(task.id).unwrap(), updated);
    }

    #[test]
    fn update_missing_returns_none_and_leaves_store_unmodified() {
        let store = TaskStore::new();
        store.add(draft("a"));
        assert!(store.update(999, draft("b")).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().title, "a");
    }

    #[test]
    fn delete_twice_second_returns_false() {
        let store = TaskStore::new();
        let task = store.add(draft("a"));
        assert!(store.delete(task.id));
        assert!(!store.delete(task.id));
    }

    #[test]
    fn list_all_snapshots_every_record() {
        let store = TaskStore::new();
        store.add(draft("a"));
        store.add(draft("b"));
        let mut titles: Vec<String> = store.list_all().into_iter().map(|t| t.title).collect();
        titles.sort();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn map_key_equals_record_id() {
        let store = TaskStore::new();
        for i in 0..10 {
            store.add(draft(&format!("t{i}")));
        }
        for task in store.list_all() {
            assert_eq!(store.get(task.id).unwrap().id, task.id);
        }
    }

    #[test]
    fn concurrent_adds_yield_distinct_sequential_ids() {
        const N: usize = 64;
        let store = Arc::new(TaskStore::new());
        let handles: Vec<_> = (0..N)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.add(draft(&format!("t{i}"))).id)
            })
            .collect();
        let ids: HashSet<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(ids.len(), N);
        assert_eq!(store.len(), N);
        assert_eq!(ids, (1..=N as u64).collect::<HashSet<u64>>());
    }

    proptest! {
        /// For any interleaving of adds and deletes, issued ids are
        /// strictly increasing and never repeat.
        #[test]
        fn issued_ids_strictly_increase(ops in prop::collection::vec(any::<bool>(), 1..64)) {
            let store = TaskStore::new();
            let mut issued: Vec<u64> = Vec::new();
            for is_add in ops {
                if is_add || issued.is_empty() {
                    issued.push(store.add(draft("t")).id);
                } else {
                    // Delete the most recently issued id (may already be gone).
                    store.delete(*issued.last().unwrap());
                }
            }
            for pair in issued.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
        }
    }
}
