//! Stage agent: fixed instructions bound to the shared completion client.

use std::sync::Arc;

use tracing::{debug, warn};

use super::Stage;
use super::prompts::system_prompt;
use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, FinishReason, LlmProvider, TokenUsage};

/// Text produced by one stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub content: String,
    pub usage: TokenUsage,
}

/// One pipeline stage. Holds no state between runs.
pub struct StageAgent {
    stage: Stage,
    llm: Arc<dyn LlmProvider>,
    system_prompt: String,
    temperature: Option<f32>,
}

impl StageAgent {
    pub fn new(stage: Stage, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            stage,
            llm,
            system_prompt: system_prompt(stage.instructions()),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the stage on `prompt`.
    pub async fn run(&self, prompt: &str) -> Result<StageOutput, LlmError> {
        if prompt.trim().is_empty() {
            return Err(LlmError::InvalidRequest(format!(
                "{} prompt must not be empty",
                self.stage
            )));
        }

        let mut request = CompletionRequest::new(vec![
            ChatMessage::system(&self.system_prompt),
            ChatMessage::user(prompt),
        ]);
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        let response = self.llm.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(LlmError::InvalidResponse {
                provider: self.llm.model_name().to_string(),
                reason: format!("{} stage returned no text", self.stage),
            });
        }

        if response.finish_reason == FinishReason::Length {
            warn!(
                stage = %self.stage,
                response_id = response.response_id.as_deref().unwrap_or("-"),
                "Stage output hit the token limit and may be cut short"
            );
        }

        debug!(
            stage = %self.stage,
            response_id = response.response_id.as_deref().unwrap_or("-"),
            finish_reason = ?response.finish_reason,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Stage completed"
        );

        Ok(StageOutput {
            usage: TokenUsage::from(&response),
            content: response.content,
        })
    }
}
