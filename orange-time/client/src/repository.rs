//! Access to the remotely stored task collection.

use async_trait::async_trait;
use orange_time_core::Task;
use thiserror::Error;

/// Errors that can occur while talking to task storage.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The request could not be sent, or the response could not be decoded.
    #[error("Request to task storage failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Storage answered with a non-success status.
    #[error("Task storage rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },
    /// Storage cannot be used at all.
    #[error("Task storage is unavailable: {0}")]
    Unavailable(String),
}

/// Trait defining whole-collection access to stored tasks.
///
/// There is no per-task operation: every save replaces the stored collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Loads the full stored collection.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, RepositoryError>;

    /// Replaces the stored collection with `tasks`.
    async fn save_tasks(&self, tasks: Vec<Task>) -> Result<(), RepositoryError>;
}
