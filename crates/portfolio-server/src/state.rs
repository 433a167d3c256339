//! Application State

use std::sync::Arc;

use assistant_core::LlmProvider;
use portfolio_advisor::InvestmentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (Ollama, etc.)
    pub provider: Arc<dyn LlmProvider>,

    /// Investment storage backend
    pub store: Arc<dyn InvestmentStore>,

    /// Model used for the advisor flows
    pub model: String,
}
