//! Stateless HTTP request builder and response parser for the task store.
//!
//! # Design
//! `TaskClient` holds only a `base_url`. Each store operation is split into
//! a `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes the matching `HttpResponse`. `ClientStore` glues the two
//! halves together with a `Transport`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DraftTask, Task, TaskId};

/// Synchronous, stateless client for the task store's HTTP API.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: String,
}

impl TaskClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item(&self, id: TaskId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Get, self.collection())
    }

    pub fn build_create_task(&self, draft: &DraftTask) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Post, self.collection(), body))
    }

    /// Full replace: the whole task is sent, not a patch.
    pub fn build_update_task(&self, id: TaskId, task: &Task) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(task).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest::json(HttpMethod::Put, self.item(id), body))
    }

    pub fn build_delete_task(&self, id: TaskId) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.item(id))
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response.body)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, &[201, 200])?;
        decode(&response.body)
    }

    /// The store may echo the task back; the body is not needed.
    pub fn parse_update_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])?;
        Ok(())
    }

    pub fn parse_delete_task(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
