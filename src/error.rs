//! Error types for task and cache operations.
//!
//! [`TaskError`] is the coordinator-level error surfaced to the HTTP
//! layer. [`CacheError`] is the backend-level error for cache operations;
//! it is never surfaced to clients -- the coordinator records it and
//! proceeds as if the cache had simply missed.

use thiserror::Error;

/// Errors that can occur during a task operation.
///
/// Each variant maps to exactly one HTTP outcome (see
/// [`http`](crate::http)): `InvalidId` to 400, `NotFound` to 404,
/// `Serialization` to 500. Cache failures are deliberately **not** a
/// variant here; they are swallowed by the coordinator.
///
/// # Examples
///
/// ```
/// use taskserve::TaskError;
///
/// let err = TaskError::NotFound { id: 42 };
/// assert_eq!(err.to_string(), "task not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum TaskError {
    /// The path identifier was not a valid positive integer.
    #[error("invalid task id: {given}")]
    InvalidId {
        /// The raw path segment that failed to parse.
        given: String,
    },

    /// No task exists with the given identifier.
    #[error("task not found: {id}")]
    NotFound {
        /// The identifier that was not found.
        id: u64,
    },

    /// Encoding an otherwise-successful store result failed. Should be
    /// unreachable for the fixed task schema, but handled rather than
    /// panicked on.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from a cache backend (network failure, timeout, backend error).
///
/// Recovered locally in every case: the coordinator logs the failure,
/// bumps the error counter, and falls through to the store. A cache
/// error never changes the HTTP outcome of a request.
#[derive(Debug, Error)]
pub enum CacheError {
    /// An I/O or backend-specific failure.
    #[error("cache backend error: {message}")]
    Backend {
        /// Human-readable description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CacheError {
    /// Wraps an arbitrary backend error with context.
    pub fn backend(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_error_display() {
        let err = TaskError::InvalidId {
            given: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid task id: abc");

        let err = TaskError::NotFound { id: 7 };
        assert_eq!(err.to_string(), "task not found: 7");
    }

    #[test]
    fn cache_error_display_and_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let err = CacheError::backend("redis GET failed", inner);
        assert_eq!(err.to_string(), "cache backend error: redis GET failed");

        let source = std::error::Error::source(&err);
        assert!(source.is_some());
        assert!(source.unwrap().to_string().contains("timed out"));
    }

    #[test]
    fn cache_error_without_source() {
        let err = CacheError::Backend {
            message: "unreachable".to_string(),
            source: None,
        };
        assert!(std::error::Error::source(&err).is_none());
    }
}
