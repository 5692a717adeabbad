//! Chat-completion envelope shaping
//!
//! Consumer-facing responses mimic the well-known chat-completion wire
//! format: a `chatcmpl-` id, `object: "chat.completion"`, a creation
//! timestamp, a model name, and a `choices` array.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion envelope returned on consumer-facing routes
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionEnvelope {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: ChoiceMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub role: String,
    pub content: String,
}

impl CompletionEnvelope {
    /// Envelope carrying a single choice
    pub fn with_choice(
        model: &str,
        role: &str,
        content: impl Into<String>,
        finish_reason: Option<&str>,
    ) -> Self {
        Self {
            id: completion_id(),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            model: model.to_string(),
            choices: vec![Choice {
                index: 0,
                message: ChoiceMessage {
                    role: role.to_string(),
                    content: content.into(),
                },
                finish_reason: finish_reason.map(ToString::to_string),
            }],
        }
    }

    /// Envelope with no choices, reported when nothing is pending
    pub fn empty(model: &str) -> Self {
        Self {
            id: completion_id(),
            object: "chat.completion".to_string(),
            created: Utc::now().timestamp(),
            model: model.to_string(),
            choices: Vec::new(),
        }
    }
}

/// `chatcmpl-` id carrying the first eight characters of a v4 uuid
fn completion_id() -> String {
    let uuid = Uuid::new_v4().to_string();
    format!("chatcmpl-{}", &uuid[..8])
}

/// Typed error body on consumer-facing routes
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ApiErrorBody {
    /// Error body with type `invalid_request_error`
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            error: ApiError {
                message: message.into(),
                kind: "invalid_request_error".to_string(),
            },
        }
    }
}
