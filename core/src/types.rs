//! Domain types for the task list.
//!
//! # Design
//! Field names on the wire follow the store's schema (`completed_flg`,
//! `delete_flg`, `sort_order`); the Rust side uses plain names and maps them
//! with `serde(rename)`. The mock-server crate defines its own copy of the
//! schema; integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

/// Store-assigned task identifier. Never reused within a session.
pub type TaskId = u64;

/// A single task as held by the store and mirrored locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    #[serde(rename = "completed_flg")]
    pub completed: bool,
    #[serde(rename = "delete_flg")]
    pub deleted: bool,
    #[serde(default)]
    pub sort_order: i64,
}

impl Task {
    /// Content may only change while the task is neither completed nor in
    /// the trash.
    pub fn is_editable(&self) -> bool {
        !self.completed && !self.deleted
    }

    /// Return a copy with a single field replaced.
    pub fn with(&self, update: &FieldUpdate) -> Task {
        let mut next = self.clone();
        match update {
            FieldUpdate::Content(content) => next.content = content.clone(),
            FieldUpdate::Completed(completed) => next.completed = *completed,
            FieldUpdate::Deleted(deleted) => next.deleted = *deleted,
        }
        next
    }
}

/// Payload for creating a task. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftTask {
    pub content: String,
    #[serde(rename = "completed_flg", default)]
    pub completed: bool,
    #[serde(rename = "delete_flg", default)]
    pub deleted: bool,
    #[serde(default)]
    pub sort_order: i64,
}

impl DraftTask {
    /// A fresh, unchecked, untrashed draft with sort order 0.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            completed: false,
            deleted: false,
            sort_order: 0,
        }
    }

    /// Attach a store-assigned id.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            content: self.content,
            completed: self.completed,
            deleted: self.deleted,
            sort_order: self.sort_order,
        }
    }
}

/// One field change on an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Content(String),
    Completed(bool),
    Deleted(bool),
}

/// Which subset of the task list is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Unchecked,
    Trash,
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::Completed => task.completed && !task.deleted,
            Filter::Unchecked => !task.completed && !task.deleted,
            Filter::Trash => task.deleted,
            Filter::All => !task.deleted,
        }
    }

    /// New tasks can only be entered from views where they would appear.
    pub fn accepts_input(self) -> bool {
        !matches!(self, Filter::Completed | Filter::Trash)
    }
}
