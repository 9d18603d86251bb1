//! Summarize command implementation.

use super::{build_provider, require_key};
use crate::cli::SummarizeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use casefile_extractor::{read_records, summarize, summary_path_for, write_summary};

/// Execute the summarize command.
pub async fn execute_summarize(
    args: SummarizeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let key = require_key(args.provider.api_key.as_deref(), "--api-key", "MISTRAL_API_KEY")?;
    let provider = build_provider(&args.provider, config, key)?;

    let records = read_records(&args.input)?;
    if records.is_empty() {
        println!("{}", formatter.warning("No records to summarize"));
    }

    let summary = summarize(&provider, &records).await;
    let output = args.output.unwrap_or_else(|| summary_path_for(&args.input));
    write_summary(&output, &summary)?;

    println!("{}", summary);
    println!("{}", formatter.success(&format!("Summary saved to {}", output.display())));

    Ok(())
}
