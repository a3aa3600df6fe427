//! Task wire and domain types.

use serde::{Deserialize, Serialize};

/// A task record.
///
/// Wire shape: `{"id": integer, "title": string, "completed": boolean}`.
/// The `id` is assigned by the store on creation and preserved on update
/// regardless of what the client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store. Positive, never reused.
    pub id: u64,
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
}

/// Client-supplied task fields, as decoded from a create or update body.
///
/// Deliberately has no `id` field: any identifier in the payload is
/// skipped during deserialization, so the path identifier (or the
/// store-assigned one) always wins. Both fields are required; a body
/// missing either is rejected before the store is touched.
///
/// # Examples
///
/// ```
/// use taskserve::TaskDraft;
///
/// let draft: TaskDraft =
///     serde_json::from_str(r#"{"title":"buy milk","completed":false}"#).unwrap();
/// assert_eq!(draft.title, "buy milk");
/// assert!(!draft.completed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    /// Task title.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
}

impl Task {
    /// Builds a task from an assigned identifier and draft fields.
    pub fn from_draft(id: u64, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            completed: draft.completed,
        }
    }
}
