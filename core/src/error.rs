//! Error types for the store client and the task list controller.
//!
//! # Design
//! `ApiError` describes why a single store call failed. `TaskError` says
//! which controller step the failure belongs to, so the presentation layer
//! can tell a failed load from a failed create or a failed background
//! update. None of them are fatal: the controller stays usable after any
//! of these.

use thiserror::Error;

use crate::types::TaskId;

/// Errors returned by `TaskClient` parse methods and `TaskStore` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store returned 404: the task does not exist.
    #[error("resource not found")]
    NotFound,

    /// The store returned a non-success status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// A failed controller step, reported upward as a discrete signal.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The initial fetch failed; the collection was left as it was.
    #[error("failed to load tasks: {0}")]
    Load(#[source] ApiError),

    /// Create was rejected; nothing was added and the draft text is kept.
    #[error("failed to create task: {0}")]
    Create(#[source] ApiError),

    /// The local change was already applied and is not rolled back.
    #[error("failed to update task {id}: {source}")]
    Update {
        id: TaskId,
        #[source]
        source: ApiError,
    },

    /// The task was still removed locally.
    #[error("failed to delete task {id}: {source}")]
    Delete {
        id: TaskId,
        #[source]
        source: ApiError,
    },
}

impl TaskError {
    /// Id of the task the failure belongs to, if it concerns a single one.
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            TaskError::Update { id, .. } | TaskError::Delete { id, .. } => Some(*id),
            TaskError::Load(_) | TaskError::Create(_) => None,
        }
    }
}
