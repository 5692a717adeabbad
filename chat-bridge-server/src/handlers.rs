//! Request handlers
//!
//! Producer-facing routes (`/chat`, `/response/latest`) use flat
//! `{"error": "..."}` bodies; consumer-facing routes speak the
//! chat-completion envelope with typed error bodies.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use chat_bridge_core::relay::ReplyPoll;
use chat_bridge_core::utils::truncate;
use chat_bridge_core::Error;

use crate::envelope::{ApiErrorBody, CompletionEnvelope};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StoreResponseRequest {
    #[serde(default)]
    pub response: Option<String>,
}

/// POST /api/v1/chat — producer submits a message for relay
pub async fn submit_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> (StatusCode, Json<Value>) {
    state.throttle.throttle().await;

    let Some(message) = payload.message else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message is required" })),
        );
    };

    match state.relay.submit_message(message.clone()) {
        Ok(()) => {
            if let Some(transcript) = &state.transcript {
                transcript.record_sent(&message);
            }
            info!(preview = %truncate(&message, 64), "message queued");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Message queued successfully"
                })),
            )
        }
        Err(Error::DuplicateMessage) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message already processed" })),
        ),
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Message is required" })),
        ),
    }
}

/// GET /api/v1/messages/pending and /api/v1/chat/completions/latest —
/// consumer polls for the next pending message
///
/// Single delivery: a returned message is removed from the queue. An
/// envelope with an empty `choices` array reports that nothing is
/// pending, without blocking.
pub async fn pending_message(State(state): State<AppState>) -> Json<CompletionEnvelope> {
    state.throttle.throttle().await;

    match state.relay.poll_message() {
        Some(message) => {
            debug!("delivering pending message to consumer");
            Json(CompletionEnvelope::with_choice(
                &state.envelope.model,
                "user",
                message.body,
                None,
            ))
        }
        None => Json(CompletionEnvelope::empty(&state.envelope.model)),
    }
}

/// POST /api/v1/chat/completions — consumer stores a reply
pub async fn store_response(
    State(state): State<AppState>,
    Json(payload): Json<StoreResponseRequest>,
) -> Result<Json<CompletionEnvelope>, (StatusCode, Json<ApiErrorBody>)> {
    let Some(response) = payload.response else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorBody::invalid_request("Response is required")),
        ));
    };

    match state.relay.submit_response(response.clone()) {
        Ok(seq) => {
            if let Some(transcript) = &state.transcript {
                transcript.record_received(&response);
            }
            debug!(seq, "reply stored");
            Ok(Json(CompletionEnvelope::with_choice(
                &state.envelope.model,
                "assistant",
                "Response stored successfully",
                Some("stop"),
            )))
        }
        Err(_) => Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorBody::invalid_request("Response is required")),
        )),
    }
}

/// GET /api/v1/response/latest — producer polls for the next unseen reply
///
/// The two 404 bodies are deliberately distinct: "No response available"
/// means no reply has ever arrived, "No new responses available" means
/// the caller is caught up. Both mean "keep polling".
pub async fn latest_response(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.relay.poll_response() {
        ReplyPoll::Ready { text, seq } => {
            debug!(seq, "delivering reply to producer");
            (StatusCode::OK, Json(json!({ "response": text })))
        }
        ReplyPoll::NoNew => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No new responses available" })),
        ),
        ReplyPoll::Empty => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No response available" })),
        ),
    }
}
