use anyhow::Context;
use polyassist::api::{self, app_state::AppState};
use polyassist::config::loader::ConfigLoader;
use polyassist::observability::{
    AppMetrics, ObservabilityState, create_observability_router, init_tracing,
};
use polyassist::services::create_chatbot_service;
use polyassist::storage::{CollegeRepository, PgCollegeRepository, PgPool};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.app_name, &config.logging)?;
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let db_pool = PgPool::connect(config.database.clone())
        .await
        .context("failed to connect to the college database")?;
    info!("Database connection pool initialized");

    let repository: Arc<dyn CollegeRepository> = Arc::new(PgCollegeRepository::new(db_pool));
    let metrics = Arc::new(AppMetrics::default());

    let chatbot_service = create_chatbot_service(repository.clone());
    info!("Chatbot service initialized");

    let app_state = AppState::new(chatbot_service, metrics.clone());

    let observability_state = ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
        repository,
    );
    let router = create_observability_router(observability_state)
        .merge(api::create_router(app_state, &config.server));
    info!("API router created with observability endpoints");

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
