//! Create, update and delete operations over a [`TaskStore`].
//!
//! Every operation here leaves the store sorted. Persisting the result is the
//! caller's job; see the client crate's on-commit hook.

use crate::date::TaskDate;
use crate::model::{Category, Status, Task};
use crate::store::TaskStore;
use chrono::NaiveDate;

/// Title given to freshly created tasks.
pub const UNTITLED_TASK: &str = "Untitled Task";

/// Whether an upsert added a new task or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Fills in the end date of a completed task that has none.
///
/// Returns `true` when the task was changed.
pub fn apply_completion_rule(task: &mut Task, today: NaiveDate) -> bool {
    if task.status == Status::Done && task.end_date_str.is_none() {
        task.end_date_str = Some(TaskDate::from_date(today));
        true
    } else {
        false
    }
}

impl TaskStore {
    /// Builds a new, not yet stored, task dated `today`.
    ///
    /// The id is `new-<timestamp_millis>`, bumped forward until it does not
    /// collide with a stored task.
    pub fn create_draft(&self, today: NaiveDate, timestamp_millis: i64) -> Task {
        let mut stamp = timestamp_millis;
        while self.contains(&format!("new-{stamp}")) {
            stamp += 1;
        }

        Task {
            id: format!("new-{stamp}"),
            title: UNTITLED_TASK.to_string(),
            category: Category::Personal,
            date_str: TaskDate::from_date(today),
            end_date_str: None,
            start_time: None,
            end_time: None,
            description: String::new(),
            status: Status::ToDo,
            priority: None,
            content: String::new(),
        }
    }

    /// Replaces the task with the same id, or appends it, then re-sorts.
    ///
    /// A task marked done without an end date gets `today` as its end date.
    #[tracing::instrument(skip(self, task), fields(id = %task.id))]
    pub fn upsert(&mut self, mut task: Task, today: NaiveDate) -> UpsertOutcome {
        if apply_completion_rule(&mut task, today) {
            tracing::debug!("Filled end date of completed task {}", task.id);
        }

        let tasks = self.tasks_mut();
        let outcome = match tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => {
                *existing = task;
                UpsertOutcome::Updated
            }
            None => {
                tasks.push(task);
                UpsertOutcome::Inserted
            }
        };
        self.sort();
        outcome
    }

    /// Removes the task with `id`, returning it. Absent ids leave the store untouched.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let tasks = self.tasks_mut();
        let Some(position) = tasks.iter().position(|task| task.id == id) else {
            tracing::debug!("No task with id {} to remove", id);
            return None;
        };
        Some(tasks.remove(position))
    }
}
