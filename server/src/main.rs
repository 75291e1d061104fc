use std::sync::Arc;

use tokio::net::TcpListener;
use todo_server::{Config, MemoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        listen_addr = %config.listen_addr(),
        request_timeout_secs = config.request_timeout.as_secs(),
        "Configuration loaded"
    );

    let store = Arc::new(MemoryStore::new());
    let listener = TcpListener::bind(config.listen_addr()).await?;
    todo_server::run(listener, store, &config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
