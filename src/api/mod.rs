// src/api/mod.rs — HTTP API serving the browser front-end

pub mod handlers;
pub mod types;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::core::session::SessionRegistry;
use crate::core::turn::Companion;
use crate::infra::config::ApiConfig;
pub use types::MessageRequest;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub companion: Companion,
    pub sessions: Arc<SessionRegistry>,
}

impl ApiState {
    pub fn new(companion: Companion, task_names: Vec<String>) -> Self {
        Self {
            companion,
            sessions: Arc::new(SessionRegistry::new(task_names)),
        }
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
            HeaderValue::from_static("http://localhost:8501"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
            HeaderValue::from_static("http://127.0.0.1:5173"),
            HeaderValue::from_static("http://127.0.0.1:8501"),
        ])
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    Router::new()
        .route("/api/v1/sessions", post(handlers::create_session))
        .route(
            "/api/v1/sessions/{id}",
            get(handlers::get_session).delete(handlers::end_session),
        )
        .route("/api/v1/sessions/{id}/messages", post(handlers::post_message))
        .route("/api/v1/sessions/{id}/mood", get(handlers::get_mood))
        .route(
            "/api/v1/sessions/{id}/tasks/{name}/toggle",
            post(handlers::toggle_task),
        )
        .route("/api/v1/sessions/{id}/journal", post(handlers::save_journal))
        .route("/api/v1/resources", get(handlers::get_resources))
        .route("/api/v1/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Serve the API until Ctrl-C.
pub async fn start_server(config: &ApiConfig, state: ApiState) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);

    let router = build_router(state);

    tracing::info!("API server listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}
