//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required API credential is not set
    #[error("Missing credential: pass {flag} or set {env}")]
    MissingCredential {
        /// Command-line flag carrying the credential
        flag: &'static str,
        /// Environment variable carrying the credential
        env: &'static str,
    },

    /// Extraction error
    #[error(transparent)]
    Extractor(#[from] casefile_extractor::ExtractorError),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] casefile_llm::LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
