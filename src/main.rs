// Main entry point - Dependency injection and server setup
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use chart_dashboard::application::snapshot_service::SnapshotService;
use chart_dashboard::infrastructure::config::load_server_config;
use chart_dashboard::infrastructure::json_file_storage::JsonFileStorage;
use chart_dashboard::presentation::app_state::AppState;
use chart_dashboard::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = load_server_config()?;

    // Create storage (infrastructure layer)
    let storage = Arc::new(JsonFileStorage::new(config.server.state_file.clone()));

    // Create services (application layer)
    let snapshot_service = SnapshotService::new(storage.clone());

    // Create application state
    let state = Arc::new(AppState { snapshot_service });

    // Build router (presentation layer)
    let router = router(state);

    // Start server
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Starting dashboard service on {} (state file {})",
        listener.local_addr()?,
        storage.path().display()
    );

    axum::serve(listener, router).await?;

    Ok(())
}
