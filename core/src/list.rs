//! In-memory task list state and its transitions.
//!
//! # Design
//! `TaskList` is an owned state object with no I/O. Each operation that
//! needs the store is split in two: a `begin`-style call that changes what
//! can change locally and returns the payload to send, and a `finish`-style
//! call that applies the store's answer to the *current* collection. The
//! `Controller` drives both halves around real store calls; tests can drive
//! them directly.
//!
//! The master collection is the only state. Filtered views are derived on
//! every call and never stored.

use crate::types::{DraftTask, FieldUpdate, Filter, Task, TaskId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
    input: String,
    filter: Filter,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            ..Self::default()
        }
    }

    /// Master collection in display order, trashed tasks included.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Pending text in the entry box.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Tasks matching the active filter, in master order.
    pub fn filtered_view(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    /// Replace the master collection with a fresh snapshot.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Validate `text` and produce the draft to create.
    ///
    /// Returns `None` without touching any state when the text is empty or
    /// the active filter does not take new tasks. Otherwise `text` becomes
    /// the pending input, so it survives a failed create.
    pub fn begin_submit(&mut self, text: &str) -> Option<DraftTask> {
        if text.is_empty() || !self.filter.accepts_input() {
            return None;
        }
        self.input = text.to_string();
        Some(DraftTask::new(text))
    }

    /// Prepend the store-assigned task and clear the entry box.
    pub fn finish_submit(&mut self, task: Task) {
        self.tasks.insert(0, task);
        self.input.clear();
    }

    /// Apply one field change in place and return the task to persist.
    ///
    /// Unknown ids and content edits on completed or trashed tasks are
    /// ignored and return `None`.
    pub fn set_field(&mut self, id: TaskId, update: FieldUpdate) -> Option<Task> {
        let slot = self.tasks.iter_mut().find(|t| t.id == id)?;
        if matches!(update, FieldUpdate::Content(_)) && !slot.is_editable() {
            return None;
        }
        *slot = slot.with(&update);
        Some(slot.clone())
    }

    /// Ids of every trashed task, in master order.
    pub fn purge_targets(&self) -> Vec<TaskId> {
        self.tasks.iter().filter(|t| t.deleted).map(|t| t.id).collect()
    }

    /// Drop the purged ids from the master collection.
    pub fn finish_purge(&mut self, ids: &[TaskId]) {
        self.tasks.retain(|t| !ids.contains(&t.id));
    }

    /// Move the displayed task at `source` to `destination`.
    ///
    /// Indexes address the filtered view. Visible tasks are permuted among
    /// the master positions they already occupy, so hidden tasks keep their
    /// place. The displayed sequence is then renumbered `1..=n` and returned
    /// whole for persistence, so a sort order whose earlier write failed is
    /// sent again. A missing destination or an out-of-range index leaves
    /// everything as it was.
    pub fn reorder(&mut self, source: usize, destination: Option<usize>) -> Vec<Task> {
        let Some(destination) = destination else {
            return Vec::new();
        };
        let slots: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| self.filter.matches(t))
            .map(|(i, _)| i)
            .collect();
        if source >= slots.len() || destination >= slots.len() {
            return Vec::new();
        }

        let mut visible: Vec<Task> = slots.iter().map(|&i| self.tasks[i].clone()).collect();
        let moved = visible.remove(source);
        visible.insert(destination, moved);

        let mut renumbered = Vec::with_capacity(visible.len());
        for (position, (slot, mut task)) in slots.into_iter().zip(visible).enumerate() {
            task.sort_order = position as i64 + 1;
            renumbered.push(task.clone());
            self.tasks[slot] = task;
        }
        renumbered
    }
}
