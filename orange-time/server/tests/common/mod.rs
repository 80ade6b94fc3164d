use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use orange_time_server::storage::TaskFileStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test context holding a task file in its own temporary directory.
pub struct TestContext {
    #[allow(dead_code)] // dir is kept so the task file is not deleted
    pub dir: TempDir,
    pub path: PathBuf,
    pub store: Arc<TaskFileStore>,
}

/// Setup function for endpoint tests: an initialized, empty task file.
pub async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("tasks.json");
    let store = TaskFileStore::new(&path);
    store.init().await?;
    Ok(TestContext {
        dir,
        path,
        store: Arc::new(store),
    })
}

/// JSON response snapshot for testing endpoints.
#[derive(Debug, Serialize)]
pub struct JsonResponseSnapshot {
    test_context: String,
    status: u16,
    headers: BTreeMap<String, String>,
    body: serde_json::Value,
}

impl JsonResponseSnapshot {
    pub async fn capture(response: Response, test_context: &str) -> Self {
        let status = response.status();
        let headers = filter_variable_headers(response.headers());
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Self {
            test_context: test_context.to_string(),
            status: status.as_u16(),
            headers,
            body: serde_json::from_slice(&body).unwrap(),
        }
    }
}

/// Filter out variable headers from response headers for snapshot testing.
fn filter_variable_headers(headers: &axum::http::HeaderMap) -> BTreeMap<String, String> {
    let variable_headers = ["date", "content-length", "vary"];

    headers
        .iter()
        .filter_map(|(name, value)| {
            let name_str = name.as_str().to_lowercase();
            if variable_headers.contains(&name_str.as_str()) {
                None
            } else {
                value.to_str().ok().map(|v| (name_str, v.to_string()))
            }
        })
        .collect()
}

pub fn get_tasks_request() -> Request<Body> {
    Request::builder()
        .uri("/api/tasks")
        .body(Body::empty())
        .unwrap()
}

pub fn post_tasks_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/tasks")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}
