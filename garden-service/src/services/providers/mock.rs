//! Mock provider implementation for testing and unconfigured runs.

use super::{
    FinishReason, GenerationParams, PromptPart, ProviderError, ProviderResponse, TextProvider,
};
use async_trait::async_trait;

/// Mock text provider.
pub struct MockTextProvider {
    enabled: bool,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        parts: &[PromptPart],
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        if params.force_json {
            return Ok(ProviderResponse {
                text: Some(
                    r#"[{"month":"January","task":"Prune roses","priority":"High","details":"Sample schedule entry."}]"#
                        .to_string(),
                ),
                input_tokens: 0,
                output_tokens: 10,
                finish_reason: FinishReason::Complete,
            });
        }

        // Echo the last text part, which is the user's message.
        let last_text = parts
            .iter()
            .rev()
            .find_map(|p| match p {
                PromptPart::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or("");

        Ok(ProviderResponse {
            text: Some(format!("Mock gardening advice for: {}", last_text)),
            input_tokens: last_text.len() as i32 / 4,
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
