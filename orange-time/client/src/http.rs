use crate::config::ClientConfig;
use crate::repository::{RepositoryError, TaskRepository};
use async_trait::async_trait;
use orange_time_core::Task;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`TaskRepository`] backed by the task server's `/api/tasks` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTaskRepository {
    client: Client,
    tasks_url: String,
}

impl HttpTaskRepository {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            tasks_url: format!("{}/api/tasks", base_url.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_url)
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }
}

/// A server that cannot be reached at all is unavailable; anything else that
/// goes wrong on the wire is a transport failure.
fn send_error(err: reqwest::Error) -> RepositoryError {
    if err.is_connect() {
        RepositoryError::Unavailable(err.to_string())
    } else {
        RepositoryError::Transport(err)
    }
}

/// Converts each stored element on its own, so one unreadable entry does not
/// cost the rest of the collection. Unreadable entries are logged and skipped.
fn decode_tasks(values: Vec<Value>) -> Vec<Task> {
    let total = values.len();
    let tasks: Vec<Task> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Task>(value) {
            Ok(task) => Some(task),
            Err(err) => {
                tracing::warn!("Skipping unreadable stored task at index {}: {}", index, err);
                None
            }
        })
        .collect();
    if tasks.len() < total {
        tracing::warn!("Read {} of {} stored tasks", tasks.len(), total);
    }
    tasks
}

/// Turns a non-success response into [`RepositoryError::Rejected`], using the
/// server's `{error}` message when there is one.
async fn ensure_success(response: Response) -> Result<Response, RepositoryError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(RepositoryError::Rejected {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    #[tracing::instrument(skip(self), fields(url = %self.tasks_url))]
    async fn fetch_tasks(&self) -> Result<Vec<Task>, RepositoryError> {
        let response = self
            .client
            .get(&self.tasks_url)
            .send()
            .await
            .map_err(send_error)?;
        // A body that is not a JSON array fails here as a whole.
        let values = ensure_success(response).await?.json::<Vec<Value>>().await?;
        let tasks = decode_tasks(values);
        tracing::debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, tasks), fields(url = %self.tasks_url, count = tasks.len()))]
    async fn save_tasks(&self, tasks: Vec<Task>) -> Result<(), RepositoryError> {
        let response = self
            .client
            .post(&self.tasks_url)
            .json(&tasks)
            .send()
            .await
            .map_err(send_error)?;
        ensure_success(response).await?;
        Ok(())
    }
}
