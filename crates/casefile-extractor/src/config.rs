//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How the input document is cut into units, and which prompt is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Fixed-width chunks of an HTML export
    Html,
    /// Fixed-width chunks of OCR plain text
    #[default]
    Text,
    /// Delimiter-marked pages of OCR text
    Pages,
}

impl InputMode {
    /// Whether units are fixed-width chunks rather than pages
    pub fn is_chunked(&self) -> bool {
        !matches!(self, InputMode::Pages)
    }

    /// Lowercase name as used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Html => "html",
            InputMode::Text => "text",
            InputMode::Pages => "pages",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(InputMode::Html),
            "text" => Ok(InputMode::Text),
            "pages" => Ok(InputMode::Pages),
            other => Err(format!(
                "unknown input mode '{}' (expected html, text or pages)",
                other
            )),
        }
    }
}

/// Configuration for an extraction run
///
/// Passed explicitly to the pipeline and to every worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// How to split the input
    pub mode: InputMode,

    /// Maximum chunk size in characters (chunk modes only)
    pub max_chunk_size: usize,

    /// Fixed pause after every request (seconds)
    pub wait_time_secs: u64,

    /// Run the summary pass after aggregation
    pub summarize: bool,
}

impl ExtractorConfig {
    /// Get the inter-request pause as a Duration
    pub fn wait_time(&self) -> Duration {
        Duration::from_secs(self.wait_time_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_chunk_size == 0 {
            return Err("max_chunk_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::Text,
            max_chunk_size: 10_000,
            wait_time_secs: 60,
            summarize: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mode, InputMode::Text);
        assert_eq!(config.max_chunk_size, 10_000);
        assert_eq!(config.wait_time(), Duration::from_secs(60));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = ExtractorConfig {
            max_chunk_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig {
            mode: InputMode::Pages,
            max_chunk_size: 4_000,
            wait_time_secs: 5,
            summarize: true,
        };
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config, parsed);
        assert!(toml_str.contains("mode = \"pages\""));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("wait_time_secs = 2").unwrap();
        assert_eq!(parsed.wait_time_secs, 2);
        assert_eq!(parsed.mode, InputMode::Text);
        assert_eq!(parsed.max_chunk_size, 10_000);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("html".parse::<InputMode>().unwrap(), InputMode::Html);
        assert_eq!("PAGES".parse::<InputMode>().unwrap(), InputMode::Pages);
        assert!("pdf".parse::<InputMode>().is_err());
        assert_eq!(InputMode::Text.to_string(), "text");
        assert!(InputMode::Html.is_chunked());
        assert!(!InputMode::Pages.is_chunked());
    }
}
