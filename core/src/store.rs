//! The store client contract and its implementations.
//!
//! # Design
//! `TaskStore` is the seam between the controller and wherever tasks are
//! persisted. `ClientStore` implements it over HTTP by pairing each
//! `TaskClient::build_*` with its `parse_*` around a `Transport`, so the
//! request codec stays I/O-free. `MemoryStore` keeps everything in process.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::client::TaskClient;
#[cfg(feature = "reqwest")]
use crate::config::Config;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{DraftTask, Task, TaskId};

/// Remote persistence for the task list.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Full snapshot, in display order.
    async fn list(&self) -> Result<Vec<Task>, ApiError>;

    /// Persist a draft and return it with its assigned id.
    async fn create(&self, draft: &DraftTask) -> Result<Task, ApiError>;

    /// Replace the stored task with `task`.
    async fn update(&self, id: TaskId, task: &Task) -> Result<(), ApiError>;

    /// Deleting a missing id is reported like any other failed delete.
    async fn delete(&self, id: TaskId) -> Result<(), ApiError>;
}

#[async_trait]
impl<S: TaskStore + ?Sized> TaskStore for Arc<S> {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        (**self).list().await
    }

    async fn create(&self, draft: &DraftTask) -> Result<Task, ApiError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: TaskId, task: &Task) -> Result<(), ApiError> {
        (**self).update(id, task).await
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        (**self).delete(id).await
    }
}

/// Executes one HTTP round-trip.
///
/// Non-2xx statuses are returned as data; only a missing response is an
/// error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// A `TaskStore` speaking the store's HTTP API.
#[derive(Debug, Clone)]
pub struct ClientStore<T> {
    client: TaskClient,
    transport: T,
}

impl<T: Transport> ClientStore<T> {
    pub fn new(client: TaskClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TaskClient {
        &self.client
    }
}

#[cfg(feature = "reqwest")]
impl ClientStore<ReqwestTransport> {
    /// Store at `config.base_url` reached through reqwest.
    pub fn from_config(config: &Config) -> Self {
        Self::new(TaskClient::new(&config.base_url), ReqwestTransport::default())
    }
}

#[async_trait]
impl<T: Transport> TaskStore for ClientStore<T> {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.transport.execute(self.client.build_list_tasks()).await?;
        self.client.parse_list_tasks(response)
    }

    async fn create(&self, draft: &DraftTask) -> Result<Task, ApiError> {
        let request = self.client.build_create_task(draft)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_task(response)
    }

    async fn update(&self, id: TaskId, task: &Task) -> Result<(), ApiError> {
        let request = self.client.build_update_task(id, task)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_task(response)
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_task(id)).await?;
        self.client.parse_delete_task(response)
    }
}

/// `Transport` backed by a shared `reqwest::Client`.
#[cfg(feature = "reqwest")]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestTransport {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        use crate::http::HttpMethod;

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, &request.path);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// In-process store. Ids start at 1 and are never handed out twice.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Debug)]
struct MemoryInner {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    /// Seed the store; new ids continue after the largest seeded one.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(MemoryInner { tasks, next_id }),
        }
    }

    /// Stored tasks in the order `list` would return them.
    pub fn snapshot(&self) -> Vec<Task> {
        let mut tasks = self.lock().tasks.clone();
        sort_for_display(&mut tasks);
        tasks
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ascending sort order; among equal orders the newest task comes first,
/// matching how fresh tasks are prepended locally.
fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        Ok(self.snapshot())
    }

    async fn create(&self, draft: &DraftTask) -> Result<Task, ApiError> {
        let mut inner = self.lock();
        let task = draft.clone().into_task(inner.next_id);
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, task: &Task) -> Result<(), ApiError> {
        let mut inner = self.lock();
        let slot = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::NotFound)?;
        *slot = Task { id, ..task.clone() };
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        let mut inner = self.lock();
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}
