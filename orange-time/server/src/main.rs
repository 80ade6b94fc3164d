#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let config = orange_time_server::config::Config::from_env()?;
    orange_time_server::web::start_web_server(config).await
}
