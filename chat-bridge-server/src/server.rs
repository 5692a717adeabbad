use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{latest_response, pending_message, store_response, submit_chat};
use crate::state::AppState;

/// Build the relay router
///
/// The consumer poll is exposed under both `/messages/pending` and
/// `/chat/completions/latest`; clients in the wild use either path.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/chat", post(submit_chat))
        .route("/api/v1/response/latest", get(latest_response))
        .route("/api/v1/messages/pending", get(pending_message))
        .route("/api/v1/chat/completions/latest", get(pending_message))
        .route("/api/v1/chat/completions", post(store_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the relay until the shutdown signal fires
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            tracing::info!("Server shutting down signal received");
        })
        .await?;

    Ok(())
}
