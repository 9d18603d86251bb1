//! Bullet-point summary over all extracted records

use crate::prompt::build_summary_prompt;
use crate::types::UnitRecord;
use casefile_domain::LlmProvider;
use serde_json::Value;
use tracing::{info, warn};

/// Prefix of the summary text when the summary call fails
pub const SUMMARY_ERROR_PREFIX: &str = "Error generating summary";

/// Summarize the extracted contents of `records` with one model call
///
/// Every record's content goes into the prompt, error markers included. A
/// failed call never fails the run: the returned text then starts with
/// [`SUMMARY_ERROR_PREFIX`].
pub async fn summarize<P: LlmProvider>(provider: &P, records: &[UnitRecord]) -> String {
    let contents: Vec<Value> = records.iter().map(|record| record.content.to_json()).collect();

    info!(
        records = contents.len(),
        failed = records.iter().filter(|record| record.content.is_error()).count(),
        model = provider.model_name(),
        "Generating summary"
    );

    match provider.generate(&build_summary_prompt(&contents)).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!(error = %e, "Summary generation failed");
            format!("{}: {}", SUMMARY_ERROR_PREFIX, e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UnitContent;
    use casefile_domain::{Unit, WorkerId};
    use casefile_llm::MockProvider;
    use serde_json::json;
    use std::time::Duration;

    fn record(index: usize, content: UnitContent) -> UnitRecord {
        UnitRecord::new(
            WorkerId::for_index(index),
            &Unit::chunk(index, "t"),
            "f.pdf",
            Duration::ZERO,
            content,
        )
    }

    #[tokio::test]
    async fn test_summary_trims_reply() {
        let provider = MockProvider::new("\n  - Jane Roe, born 1970\n\n");
        let records = vec![record(0, UnitContent::Extracted(json!({"Clients": {"name": "Jane Roe"}})))];

        let summary = summarize(&provider, &records).await;

        assert_eq!(summary, "- Jane Roe, born 1970");
        assert!(provider.prompts()[0].contains("Jane Roe"));
    }

    #[tokio::test]
    async fn test_summary_includes_error_markers() {
        let provider = MockProvider::new("- ok");
        let records = vec![
            record(0, UnitContent::api_error("rate limited")),
            record(1, UnitContent::Extracted(json!({"LegalHistory": {"court": "District"}}))),
            record(2, UnitContent::no_json()),
        ];

        summarize(&provider, &records).await;

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("District"));
        assert!(prompt.contains(r#""error": "API Error: rate limited""#));
        assert!(prompt.contains(UnitContent::NO_JSON_FOUND));
        assert!(prompt.find("rate limited") < prompt.find("District"));
    }

    #[tokio::test]
    async fn test_summary_failure_becomes_text() {
        let mut provider = MockProvider::default();
        provider.add_error_containing("summarization assistant");

        let summary = summarize(&provider, &[]).await;

        assert!(summary.starts_with("Error generating summary: "));
    }
}
