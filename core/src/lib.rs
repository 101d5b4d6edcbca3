//! Task list controller core for the todo service.
//!
//! # Overview
//! Holds the authoritative ordered list of tasks, applies create, edit,
//! complete, trash, restore, purge and reorder operations, and keeps a
//! remote store in step with local state.
//!
//! # Design
//! - `TaskList` is pure state with no I/O; `Controller` drives it against
//!   any `TaskStore`.
//! - `TaskClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values (host-does-IO); `ClientStore` runs them through a `Transport`.
//! - Local state is optimistic and never rolled back; store failures come
//!   back as `TaskError` values.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod list;
pub mod store;
pub mod types;

pub use client::TaskClient;
pub use config::Config;
pub use controller::Controller;
pub use error::{ApiError, TaskError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::TaskList;
#[cfg(feature = "reqwest")]
pub use store::ReqwestTransport;
pub use store::{ClientStore, MemoryStore, TaskStore, Transport};
pub use types::{DraftTask, FieldUpdate, Filter, Task, TaskId};
