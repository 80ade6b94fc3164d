//! Loading the collection at startup and pushing it back after every change.

use crate::repository::TaskRepository;
use chrono::NaiveDate;
use orange_time_core::{Task, seed};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Handle to a push running in the background.
///
/// Dropping it lets the push finish on its own.
#[derive(Debug)]
pub struct PendingPush(JoinHandle<()>);

impl PendingPush {
    /// Waits until the push has been attempted.
    pub async fn finished(self) {
        if let Err(err) = self.0.await {
            tracing::error!("Task push did not run to completion: {}", err);
        }
    }
}

/// Wraps a [`TaskRepository`] so that neither loading nor saving can fail
/// from the caller's point of view.
pub struct PersistenceClient<R> {
    repository: R,
    issued: AtomicU64,
    last_pushed: Mutex<u64>,
}

impl<R: TaskRepository> PersistenceClient<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            issued: AtomicU64::new(0),
            last_pushed: Mutex::new(0),
        }
    }

    /// Loads the stored collection, or generated seed data if storage cannot
    /// be reached or answered with something that is not a task list.
    ///
    /// A collection the repository returned is always kept, even when empty.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_all(&self, today: NaiveDate) -> Vec<Task> {
        match self.repository.fetch_tasks().await {
            Ok(tasks) => {
                tracing::info!("Loaded {} tasks from storage", tasks.len());
                tasks
            }
            Err(err) => {
                tracing::warn!("Could not load tasks, using seed data: {}", err);
                seed::generate(today)
            }
        }
    }

    /// Replaces the stored collection. Failures are logged and dropped.
    #[tracing::instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub async fn push_all(&self, tasks: Vec<Task>) {
        match self.repository.save_tasks(tasks).await {
            Ok(()) => tracing::debug!("Pushed task collection"),
            Err(err) => tracing::error!("Failed to save tasks: {}", err),
        }
    }

    /// Pushes `tasks` unless a later snapshot has already been pushed.
    async fn push_in_order(&self, sequence: u64, tasks: Vec<Task>) {
        let mut last_pushed = self.last_pushed.lock().await;
        if sequence < *last_pushed {
            tracing::debug!("Skipping push {} superseded by push {}", sequence, *last_pushed);
            return;
        }
        *last_pushed = sequence;
        self.push_all(tasks).await;
    }
}

impl<R: TaskRepository + 'static> PersistenceClient<R> {
    /// Starts pushing `tasks` on `runtime` without waiting for it.
    ///
    /// Pushes never overwrite a newer snapshot with an older one: a push
    /// that starts after a later one has landed is skipped.
    pub fn spawn_push(self: &Arc<Self>, runtime: &Handle, tasks: Vec<Task>) -> PendingPush {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let client = Arc::clone(self);
        PendingPush(runtime.spawn(async move {
            client.push_in_order(sequence, tasks).await;
        }))
    }
}
