//! Error types for the fitness planner.

use std::time::Duration;

use crate::planner::Stage;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Plan generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Model {model} not available on provider {provider}")]
    ModelNotAvailable { provider: String, model: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse failure category the shell uses to pick a message and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Network,
    Auth,
    RateLimited,
    UnknownModel,
    MalformedResponse,
    InvalidRequest,
}

impl LlmError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::RequestFailed { .. } => FailureKind::Network,
            Self::RateLimited { .. } => FailureKind::RateLimited,
            Self::InvalidResponse { .. } => FailureKind::MalformedResponse,
            Self::ModelNotAvailable { .. } => FailureKind::UnknownModel,
            Self::AuthFailed { .. } => FailureKind::Auth,
            Self::InvalidRequest(_) => FailureKind::InvalidRequest,
        }
    }
}

/// One of the three pipeline calls failed. The whole run is aborted.
#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct GenerationError {
    pub stage: Stage,
    #[source]
    pub source: LlmError,
}

impl GenerationError {
    pub fn new(stage: Stage, source: LlmError) -> Self {
        Self { stage, source }
    }

    pub fn kind(&self) -> FailureKind {
        self.source.kind()
    }
}

/// Errors returned by the plan command handler.
#[derive(Debug, thiserror::Error)]
pub enum PlanRequestError {
    #[error("A plan is already being generated; wait for it to finish")]
    InFlight,

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Result type alias for the planner.
pub type Result<T> = std::result::Result<T, Error>;
