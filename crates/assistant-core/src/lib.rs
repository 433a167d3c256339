//! # assistant-core
//!
//! Provider-agnostic LLM abstraction for the invest-track assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Assistant boundary                      │
//! │  ┌──────────────┐        ┌─────────────────────────────┐ │
//! │  │  Messages    │───────▶│   LlmProvider (Strategy)    │ │
//! │  │  (prompt)    │        │   Ollama / OpenAI / ...     │ │
//! │  └──────────────┘        └─────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every AI interaction in invest-track is a single stateless round trip:
//! build messages, call `complete`, validate the structured response at
//! the caller. There is no streaming, tool-calling, or session state here.

pub mod error;
pub mod message;
pub mod provider;

pub use error::{AssistantError, Result};
pub use message::{Message, Role};
pub use provider::LlmProvider;
