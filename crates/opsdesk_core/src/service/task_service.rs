//! Task use-case service.
//!
//! # Responsibility
//! - Add tasks and update their status by title.
//! - Provide the task summary and due-date ordered listing.
//!
//! # Invariants
//! - `set_status` updates every task sharing the title.
//! - Finished tasks are hidden from `editable_titles` but still updatable.

use super::run_action;
use crate::form::TaskForm;
use crate::model::task::{Task, TaskStatus};
use crate::model::RecordId;
use crate::store::{Dataset, RecordStore, StoreResult, TableRecord};
use crate::summary::TaskSummary;

const TABLE: &str = Task::TABLE;

/// Use-case service wrapper for the tasks table.
pub struct TaskService<S: RecordStore<Task>> {
    store: S,
}

impl<S: RecordStore<Task>> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a task from `form` and returns its id. Requires a title.
    pub fn add(&self, form: &mut TaskForm) -> StoreResult<RecordId> {
        let result = run_action("task_add", TABLE, || {
            let task = form.validate()?;
            let id = task.id;
            let mut dataset = self.store.load()?;
            dataset.append(task);
            self.store.save(&dataset)?;
            Ok(id)
        });
        if result.is_ok() {
            form.reset();
        }
        result
    }

    pub fn list(&self) -> StoreResult<Dataset<Task>> {
        self.store.load()
    }

    /// All tasks ordered by due date ascending.
    pub fn list_by_due_date(&self) -> StoreResult<Vec<Task>> {
        let dataset = self.store.load()?;
        Ok(dataset.sorted_by_due_date().into_iter().cloned().collect())
    }

    /// Titles offered for status editing: unique, not finished.
    pub fn editable_titles(&self) -> StoreResult<Vec<String>> {
        let dataset = self.store.load()?;
        Ok(dataset
            .editable_titles()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Sets `status` on every task titled `title`; returns how many changed.
    pub fn set_status(&self, title: &str, status: TaskStatus) -> StoreResult<usize> {
        run_action("task_set_status", TABLE, || {
            let mut dataset = self.store.load()?;
            let updated = dataset.update_status_by_title(title, status)?;
            self.store.save(&dataset)?;
            Ok(updated)
        })
    }

    pub fn summary(&self) -> StoreResult<TaskSummary> {
        Ok(self.store.load()?.summarize())
    }
}
