use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::llm::{call_llm, ChatMessage};
use service_core::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Conversation so far, oldest first.
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub async fn chat(Json(request): Json<ChatRequest>) -> Result<Json<ChatResponse>, AppError> {
    let messages = request
        .messages
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("messages array is required")))?;

    tracing::debug!(
        message_count = messages.len(),
        user_id = request.user_id.as_deref().unwrap_or("-"),
        "Chat request"
    );

    let reply = call_llm(&messages);

    Ok(Json(ChatResponse { reply }))
}
