use axum::{routing::get, Router};
use taskboard_core::{FileTaskRepository, TaskService};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::create_api_router;
use crate::config::Config;

/// Builds the whole application: API routes, health check, optional static
/// assets, request tracing and permissive CORS.
pub fn create_app(config: &Config) -> anyhow::Result<Router> {
    let repo = FileTaskRepository::new(&config.data_file)?;
    tracing::info!("Data file: {}", repo.path().display());

    let service = TaskService::new(repo).reject_past_due_dates(config.enforce_future_due_dates);

    let mut app = Router::new()
        .route("/health", get(health_check_handler))
        .merge(create_api_router(service));

    if let Some(static_dir) = config.static_dir() {
        tracing::info!("Serving static assets from {}", static_dir.display());
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    Ok(app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let app = create_app(&config)?;

    let server_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Task board server running on http://{}", server_address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
