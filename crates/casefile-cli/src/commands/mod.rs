//! Command implementations.

pub mod extract;
pub mod split;
pub mod summarize;

pub use self::extract::execute_extract;
pub use self::split::execute_split;
pub use self::summarize::execute_summarize;

use crate::cli::ProviderArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use casefile_llm::MistralProvider;

/// Build a provider for `api_key`, with flags taking precedence over the config file.
pub(crate) fn build_provider(
    provider: &ProviderArgs,
    config: &Config,
    api_key: String,
) -> Result<MistralProvider> {
    let endpoint = provider
        .endpoint
        .clone()
        .unwrap_or_else(|| config.provider.endpoint.clone());
    let model = provider
        .model
        .clone()
        .unwrap_or_else(|| config.provider.model.clone());

    Ok(MistralProvider::new(api_key, endpoint, model)?)
}

/// Require a non-empty credential.
pub(crate) fn require_key(
    value: Option<&str>,
    flag: &'static str,
    env: &'static str,
) -> Result<String> {
    value
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or(CliError::MissingCredential { flag, env })
}

#[cfg(test)]
mod tests {
    use super::*;
    use casefile_domain::LlmProvider;

    #[test]
    fn test_require_key() {
        assert_eq!(require_key(Some(" abc "), "--api-key", "MISTRAL_API_KEY").unwrap(), "abc");
        assert!(matches!(
            require_key(Some("  "), "--api-key", "MISTRAL_API_KEY"),
            Err(CliError::MissingCredential { env: "MISTRAL_API_KEY", .. })
        ));
        assert!(require_key(None, "--api-key2", "MISTRAL_API_KEY2").is_err());
    }

    #[test]
    fn test_provider_flags_override_config() {
        let args = ProviderArgs {
            model: Some("mistral-small-latest".to_string()),
            endpoint: None,
            api_key: None,
        };
        let provider = build_provider(&args, &Config::default(), "k".to_string()).unwrap();

        assert_eq!(provider.model_name(), "mistral-small-latest");
        assert_eq!(provider.endpoint(), "https://api.mistral.ai/v1");
    }
}
