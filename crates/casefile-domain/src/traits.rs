//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use std::fmt::Display;
use std::future::Future;

/// Trait for chat-completion providers
///
/// Implemented by the infrastructure layer (casefile-llm). One provider
/// instance is bound to one API credential; a worker owns exactly one.
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: Display + Send + Sync + 'static;

    /// Send a single free-text prompt and return the model's free-text reply
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Name of the model requests are sent to
    fn model_name(&self) -> &str;
}
