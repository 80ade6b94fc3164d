use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::storage::TaskFileStore;

pub mod api;

/// Builds the full application router around `store`.
///
/// Request bodies larger than `body_limit_bytes` are rejected.
pub fn create_router(store: Arc<TaskFileStore>, body_limit_bytes: usize) -> Router {
    let api_routes =
        api::create_api_router(store).layer(DefaultBodyLimit::max(body_limit_bytes));

    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Serves the application on an already bound listener until the server stops.
pub async fn serve(
    listener: TcpListener,
    store: TaskFileStore,
    body_limit_bytes: usize,
) -> anyhow::Result<()> {
    let app = create_router(Arc::new(store), body_limit_bytes);
    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let store = TaskFileStore::new(&config.data_file);
    store.init().await?;
    tracing::info!("Storing tasks in {}", store.path().display());

    let server_address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    serve(listener, store, config.body_limit_bytes).await
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
