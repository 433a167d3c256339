//! Error Types for Portfolio Advisor

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Investment not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid investment: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Assistant error: {0}")]
    Assistant(#[from] assistant_core::AssistantError),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// User-facing message; never leaks raw model output or store internals
    pub fn user_message(&self) -> String {
        match self {
            AdvisorError::NotFound(_) => "Investment not found.".into(),
            AdvisorError::Validation(msg) => msg.clone(),
            AdvisorError::Assistant(e) => e.user_message(),
            AdvisorError::MalformedResponse(_) => {
                "Could not analyze the portfolio. Please try again.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}
