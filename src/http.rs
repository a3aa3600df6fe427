//! HTTP surface: axum router, handlers, and error-to-status mapping.
//!
//! The transport layer stays thin. Handlers parse the path id and decode
//! the body, then delegate to [`TaskResource`]; every malformed input is
//! rejected with a 400 before the store or cache is touched. Cache hits
//! are written to the response body verbatim.
//!
//! | Method & path      | Success      | Failure                       |
//! |--------------------|--------------|-------------------------------|
//! | GET /tasks         | 200 array    | --                            |
//! | POST /tasks        | 201 task     | 400 malformed body            |
//! | GET /tasks/{id}    | 200 task     | 400 invalid id, 404           |
//! | PUT /tasks/{id}    | 200 empty    | 400 invalid id/body, 404      |
//! | DELETE /tasks/{id} | 200 empty    | 400 invalid id, 404           |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::error::TaskError;
use crate::resource::TaskResource;
use crate::types::{Task, TaskDraft};

/// Shared application dependencies, injected at construction.
#[derive(Clone)]
pub struct AppState {
    /// The coordinator handling every task operation.
    pub resource: Arc<TaskResource>,
}

/// Builds the application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Error responses
// ---------------------------------------------------------------------------

/// JSON error body: `{"code": ..., "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// An HTTP error response: status code plus JSON error body.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ApiError {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    fn bad_request(code: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    fn internal_error() -> Self {
        // Internal details are logged, never exposed to clients.
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "an internal error occurred",
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<TaskError> for ApiErrorResponse {
    fn from(error: TaskError) -> Self {
        match error {
            TaskError::InvalidId { .. } => Self::bad_request("INVALID_ID", error.to_string()),
            TaskError::NotFound { .. } => Self::not_found(error.to_string()),
            TaskError::Serialization(ref source) => {
                tracing::error!(%source, "response serialization failed");
                Self::internal_error()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_tasks(State(state): State<AppState>) -> Result<Response, ApiErrorResponse> {
    let cached = state.resource.list().await?;
    Ok(json_response(cached.value))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiErrorResponse> {
    let Json(draft) = payload.map_err(bad_body)?;
    let task = state.resource.create(draft).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let id = parse_id(&raw_id)?;
    let cached = state.resource.get(id).await?;
    Ok(json_response(cached.value))
}

async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_id(&raw_id)?;
    let Json(draft) = payload.map_err(bad_body)?;
    state.resource.update(id, draft).await?;
    Ok(StatusCode::OK)
}

async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_id(&raw_id)?;
    state.resource.delete(id).await?;
    Ok(StatusCode::OK)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parses a path segment into a task id, mapping failure to a 400. Done
/// by hand rather than through `Path<u64>` so the rejection body matches
/// the API's error shape.
fn parse_id(raw: &str) -> Result<u64, TaskError> {
    raw.parse().map_err(|_| TaskError::InvalidId {
        given: raw.to_string(),
    })
}

/// Maps any body rejection (bad JSON, missing fields, wrong content
/// type) to a 400. axum's default would surface some of these as 422.
fn bad_body(rejection: JsonRejection) -> ApiErrorResponse {
    ApiErrorResponse::bad_request("INVALID_BODY", rejection.body_text())
}

/// Wraps an already-serialized JSON payload as a 200 response. Used on
/// the read paths so cached payloads are returned verbatim.
fn json_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        for raw in ["abc", "-1", "1.5", "", " 1"] {
            let err = parse_id(raw).unwrap_err();
            assert!(matches!(err, TaskError::InvalidId { .. }), "raw: {raw:?}");
        }
    }

    #[test]
    fn task_error_maps_to_expected_statuses() {
        let response: ApiErrorResponse = TaskError::InvalidId {
            given: "x".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_ID");

        let response: ApiErrorResponse = TaskError::NotFound { id: 9 }.into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let response: ApiErrorResponse = TaskError::Serialization(json_err).into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        // Internal details never leak into the body.
        assert_eq!(response.error.message, "an internal error occurred");
    }
}
