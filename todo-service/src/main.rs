use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_service::{config, Config, MemoryStore, MongoStore, SharedStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before logging init so RUST_LOG may come from the file too.
    let env_file = config::load_env_file(None);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,todo_service=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    match env_file {
        Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
    }
    let config = Config::parse();

    let store: SharedStore = match config.mongodb_uri.as_deref() {
        Some(uri) if !config.in_memory => Arc::new(
            MongoStore::connect(
                uri,
                &config.database,
                &config.collection,
                config.connect_timeout(),
            )
            .await?,
        ),
        _ => {
            tracing::warn!("using in-memory store; records are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(config.addr()).await?;
    todo_service::run_with_shutdown(listener, store, shutdown_signal()).await?;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
