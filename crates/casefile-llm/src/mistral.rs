//! Mistral Provider Implementation
//!
//! Talks to Mistral's chat-completion API (or any server exposing the same
//! `/chat/completions` contract).
//!
//! Each call is a single request. There is no retry and no backoff: callers
//! that need pacing sleep between requests themselves.
//!
//! # Examples
//!
//! ```no_run
//! use casefile_llm::MistralProvider;
//! use casefile_domain::LlmProvider;
//!
//! # async fn run() -> Result<(), casefile_llm::LlmError> {
//! let provider = MistralProvider::with_default_endpoint("sk-...", "mistral-large-latest")?;
//! let reply = provider.generate("Extract the visits from this page").await?;
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use casefile_domain::traits::LlmProvider as LlmProviderTrait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Default Mistral API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

/// Mistral chat-completion provider
///
/// Holds one API credential. The key is never printed by `Debug`.
#[derive(Clone)]
pub struct MistralProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl MistralProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: bearer credential
    /// - `endpoint`: API base URL, e.g. `https://api.mistral.ai/v1`
    /// - `model`: chat model name
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = endpoint.into().trim_end_matches('/').to_string();

        Ok(Self {
            endpoint,
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a provider against [`DEFAULT_ENDPOINT`]
    pub fn with_default_endpoint(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, LlmError> {
        Self::new(api_key, DEFAULT_ENDPOINT, model)
    }

    /// API base URL this provider posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one prompt as a single user message and return the reply text
    ///
    /// # Errors
    ///
    /// - `ModelNotAvailable` on HTTP 404
    /// - `RateLimitExceeded` on HTTP 429
    /// - `Communication` on transport failures and other non-success statuses
    /// - `InvalidResponse` when the body cannot be parsed or has no content
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        match status {
            s if s.is_success() => {}
            StatusCode::NOT_FOUND => return Err(LlmError::ModelNotAvailable(self.model.clone())),
            StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimitExceeded),
            _ => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(LlmError::Communication(format!(
                    "HTTP {}: {}",
                    status, error_text
                )));
            }
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))?;

        debug!(reply_chars = content.chars().count(), "Received chat completion");
        Ok(content)
    }
}

impl fmt::Debug for MistralProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MistralProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl LlmProviderTrait for MistralProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.complete(prompt).await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
