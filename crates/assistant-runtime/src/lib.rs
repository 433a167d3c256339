//! # assistant-runtime
//!
//! Runtime LLM providers for the invest-track assistant.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//! - **OpenAI** (coming soon): OpenAI API integration
//! - **Anthropic** (coming soon): Claude API integration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use assistant_runtime::OllamaProvider;
//!
//! let provider = OllamaProvider::from_env();
//! let completion = provider.complete(&messages, &options).await?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::OllamaProvider;

// Re-export core types for convenience
pub use assistant_core::{AssistantError, LlmProvider, Message, Result, Role};
