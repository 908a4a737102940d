//! LLM integration for the planner.
//!
//! The only backend is Groq, reached through its OpenAI-compatible chat
//! completions endpoint. Stage agents talk to it through the `LlmProvider`
//! trait so tests can substitute scripted models.

mod costs;
pub mod groq;
#[cfg(test)]
pub(crate) mod mock;
pub mod provider;

pub use groq::GroqProvider;
pub use provider::*;

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;

use crate::error::LlmError;

/// Default Groq API base.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model id.
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// Configuration for creating an LLM provider.
#[derive(Debug)]
pub struct LlmConfig {
    pub api_key: secrecy::SecretString,
    pub model: String,
    pub base_url: String,
    /// No timeout when `None`.
    pub timeout: Option<Duration>,
    pub temperature: Option<f32>,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider = GroqProvider::new(
        &config.base_url,
        secrecy::SecretString::from(config.api_key.expose_secret()),
        &config.model,
        config.timeout,
    )?;
    tracing::info!("Using Groq (model: {})", config.model);
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_constructs_without_network() {
        let config = LlmConfig {
            api_key: secrecy::SecretString::from("gsk-test"),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            temperature: None,
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_name(), DEFAULT_MODEL);
    }
}
