//! Client side of Orange Time: talking to the task server and driving the
//! screens from user actions.

pub mod app;
pub mod config;
pub mod http;
pub mod persistence;
pub mod repository;

pub use app::{App, AppError};
pub use config::ClientConfig;
pub use http::HttpTaskRepository;
pub use persistence::{PendingPush, PersistenceClient};
pub use repository::{RepositoryError, TaskRepository};
