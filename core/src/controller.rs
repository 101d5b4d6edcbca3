//! The task list controller: `TaskList` state driven against a `TaskStore`.
//!
//! # Design
//! Local state is optimistic. Field changes and reorders are applied before
//! the store answers and are never rolled back; a failed call is logged and
//! handed back as a `TaskError`. Submit is the exception: nothing is added
//! until the store has assigned an id.
//!
//! Every method takes `&mut self`, so completions are always applied to the
//! current collection and there is a single writer. Batch calls (purge
//! deletes, reorder updates) are issued together and awaited as a group.

use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::TaskError;
use crate::list::TaskList;
use crate::store::TaskStore;
use crate::types::{FieldUpdate, Filter, Task, TaskId};

pub struct Controller<S> {
    list: TaskList,
    store: S,
}

impl<S: TaskStore> Controller<S> {
    pub fn new(store: S) -> Self {
        Self {
            list: TaskList::new(),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.list.tasks()
    }

    pub fn input(&self) -> &str {
        self.list.input()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.list.set_input(text);
    }

    pub fn filter(&self) -> Filter {
        self.list.filter()
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.list.set_filter(filter);
    }

    pub fn filtered_view(&self) -> Vec<&Task> {
        self.list.filtered_view()
    }

    /// Fetch the full list from the store. On failure the collection is
    /// left untouched.
    pub async fn initialize(&mut self) -> Result<(), TaskError> {
        debug!("loading tasks");
        match self.store.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.list.load(tasks);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load tasks");
                Err(TaskError::Load(e))
            }
        }
    }

    /// Create a task from `text` and prepend it once the store has
    /// assigned its id. Empty text, or a filter that does not take input,
    /// is a no-op.
    pub async fn submit(&mut self, text: &str) -> Result<(), TaskError> {
        let Some(draft) = self.list.begin_submit(text) else {
            return Ok(());
        };
        debug!(content = %draft.content, "creating task");
        match self.store.create(&draft).await {
            Ok(task) => {
                self.list.finish_submit(task);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to create task");
                Err(TaskError::Create(e))
            }
        }
    }

    /// Apply one field change locally, then persist the whole task.
    pub async fn set_field(&mut self, id: TaskId, update: FieldUpdate) -> Result<(), TaskError> {
        let Some(task) = self.list.set_field(id, update) else {
            return Ok(());
        };
        self.persist(task).await
    }

    pub async fn set_content(&mut self, id: TaskId, content: impl Into<String>) -> Result<(), TaskError> {
        self.set_field(id, FieldUpdate::Content(content.into())).await
    }

    pub async fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<(), TaskError> {
        self.set_field(id, FieldUpdate::Completed(completed)).await
    }

    pub async fn set_deleted(&mut self, id: TaskId, deleted: bool) -> Result<(), TaskError> {
        self.set_field(id, FieldUpdate::Deleted(deleted)).await
    }

    /// Permanently delete every trashed task.
    ///
    /// All deletes run concurrently. Once every one has settled the trashed
    /// tasks are removed locally, including those whose delete failed; the
    /// failures are returned.
    pub async fn purge_trash(&mut self) -> Vec<TaskError> {
        let ids = self.list.purge_targets();
        if ids.is_empty() {
            return Vec::new();
        }
        debug!(count = ids.len(), "purging trash");

        let store = &self.store;
        let results = join_all(ids.iter().map(|&id| async move { (id, store.delete(id).await) })).await;

        self.list.finish_purge(&ids);

        results
            .into_iter()
            .filter_map(|(id, result)| result.err().map(|source| (id, source)))
            .map(|(id, source)| {
                warn!(id, error = %source, "failed to delete task");
                TaskError::Delete { id, source }
            })
            .collect()
    }

    /// Commit a drag from `source` to `destination` in the filtered view
    /// and persist every renumbered task concurrently. `None` means the
    /// gesture was cancelled.
    pub async fn reorder(&mut self, source: usize, destination: Option<usize>) -> Vec<TaskError> {
        let renumbered = self.list.reorder(source, destination);
        if renumbered.is_empty() {
            return Vec::new();
        }
        debug!(source, ?destination, updates = renumbered.len(), "reordered tasks");

        let store = &self.store;
        let results = join_all(renumbered.iter().map(|task| async move {
            store
                .update(task.id, task)
                .await
                .map_err(|source| TaskError::Update { id: task.id, source })
        }))
        .await;

        results
            .into_iter()
            .filter_map(Result::err)
            .inspect(|e| warn!(error = %e, "failed to persist sort order"))
            .collect()
    }

    async fn persist(&self, task: Task) -> Result<(), TaskError> {
        debug!(id = task.id, "updating task");
        self.store.update(task.id, &task).await.map_err(|source| {
            warn!(id = task.id, error = %source, "failed to update task");
            TaskError::Update { id: task.id, source }
        })
    }
}
