use axum::{extract::State, Json};
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::prompt;
use crate::services::metrics::record_generation;
use crate::services::providers::{GenerationParams, PromptPart, ProviderError};
use crate::startup::AppState;
use service_core::error::AppError;

/// Chat modes supported by the garden assistant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Chat,
    Identify,
    Calendar,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Chat => "chat",
            ChatMode::Identify => "identify",
            ChatMode::Calendar => "calendar",
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GardenChatRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub message: String,
    /// Base64-encoded JPEG for "Snap & Solve" plant identification.
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub mode: ChatMode,
}

#[derive(Debug, Serialize)]
pub struct GardenChatResponse {
    pub answer: String,
}

fn map_provider_error(err: ProviderError) -> AppError {
    match err {
        ProviderError::RateLimited => {
            AppError::TooManyRequests("Upstream model rate limited".to_string(), None)
        }
        ProviderError::ContentFiltered => {
            AppError::BadRequest(anyhow::anyhow!("Response blocked by safety filters"))
        }
        ProviderError::InvalidRequest(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
        ProviderError::NotConfigured(_) => AppError::ServiceUnavailable,
        ProviderError::ApiError(msg) | ProviderError::NetworkError(msg) => {
            AppError::BadGateway(msg)
        }
    }
}

#[tracing::instrument(skip(state, request), fields(mode = tracing::field::Empty))]
pub async fn garden_chat(
    State(state): State<AppState>,
    Json(request): Json<GardenChatRequest>,
) -> Result<Json<GardenChatResponse>, AppError> {
    request.validate()?;

    let mode = request.mode;
    tracing::Span::current().record("mode", mode.as_str());

    let mut parts = vec![PromptPart::Text(prompt::system_prompt(Utc::now()))];

    match mode {
        ChatMode::Calendar => {
            parts.push(PromptPart::Text(prompt::calendar_instruction(
                &request.message,
            )));
        }
        ChatMode::Chat | ChatMode::Identify => {
            parts.push(PromptPart::Text(request.message.clone()));
        }
    }

    if let Some(data) = &request.image_base64 {
        base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| {
                AppError::BadRequest(anyhow::anyhow!("imageBase64 is not valid base64: {}", e))
            })?;

        parts.push(PromptPart::InlineImage {
            mime_type: "image/jpeg".to_string(),
            data: data.clone(),
        });
    }

    let params = GenerationParams {
        force_json: mode == ChatMode::Calendar,
        ..Default::default()
    };

    let response = match state.text_provider.generate(&parts, &params).await {
        Ok(response) => {
            record_generation(mode.as_str(), "ok");
            response
        }
        Err(e) => {
            record_generation(mode.as_str(), "error");
            tracing::error!(mode = mode.as_str(), error = %e, "Generation failed");
            return Err(map_provider_error(e));
        }
    };

    tracing::debug!(
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "Generation complete"
    );

    let answer = response
        .text
        .ok_or_else(|| AppError::BadGateway("Model returned no text".to_string()))?;

    Ok(Json(GardenChatResponse { answer }))
}
