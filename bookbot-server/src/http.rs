//! Webhook HTTP server.
//!
//! Axum server exposing the delivery endpoint the platform pushes updates to,
//! plus an ops health probe. The webhook handler acknowledges with 200 as
//! soon as the update is queued on its lane.
//!
//! Endpoints:
//! - POST /webhook — inbound updates
//! - GET  /health  — health check with DB status

use crate::context::AppContext;
use crate::dispatch::UpdateDispatcher;
use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use bookbot_core::config::WEBHOOK_PATH;
use bookbot_core::records::RecordStore;
use bookbot_core::telegram::Update;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub ctx: Arc<AppContext>,
    pub dispatcher: Arc<UpdateDispatcher>,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_server(state: HttpState, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.ctx.config.webhook.host, state.ctx.config.webhook.port
    );
    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Webhook server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Webhook server shutting down...");
        })
        .await?;

    Ok(())
}

/// Inner health check — probes the record store, returns (status, body).
pub async fn health_inner(records: &dyn RecordStore) -> (StatusCode, serde_json::Value) {
    match records.health_check().await {
        Ok(version) => (
            StatusCode::OK,
            serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "postgresql": version,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({
                "status": "degraded",
                "error": e.to_string(),
            }),
        ),
    }
}

async fn webhook_handler(
    State(state): State<HttpState>,
    Json(update): Json<Update>,
) -> impl IntoResponse {
    state.dispatcher.dispatch(update).await;
    StatusCode::OK
}

async fn health_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let (status, body) = health_inner(state.ctx.records.as_ref()).await;
    (status, Json(body))
}
