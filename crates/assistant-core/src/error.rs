//! Error Types

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;

/// Assistant error types
#[derive(Error, Debug)]
pub enum AssistantError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Model output could not be parsed as the expected structure
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model output parsed but violated the response schema
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AssistantError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AssistantError::ProviderUnavailable(_)
                | AssistantError::RateLimited(_)
                | AssistantError::Io(_)
        )
    }

    /// Convert to a user-friendly message
    ///
    /// Malformed model output is never surfaced raw; the user sees a
    /// generic notice and the cause goes to the logs.
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::Provider(_) | AssistantError::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            AssistantError::Parse(_) | AssistantError::SchemaViolation(_) => {
                "Could not analyze the portfolio. Please try again.".into()
            }
            AssistantError::RateLimited(_) => {
                "You've made too many requests. Please wait a moment.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Other(err.to_string())
    }
}
