//! Extract command implementation.

use super::{build_provider, require_key};
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use casefile_extractor::{read_input, Extractor, ExtractorConfig, OutputPaths};
use indicatif::MultiProgress;
use std::path::Path;
use tracing::info;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
    show_progress: bool,
) -> Result<()> {
    let extraction = resolve_config(&args, &config.extraction);
    extraction.validate().map_err(CliError::Config)?;

    let key1 = require_key(args.provider.api_key.as_deref(), "--api-key", "MISTRAL_API_KEY")?;
    let key2 = require_key(args.api_key2.as_deref(), "--api-key2", "MISTRAL_API_KEY2")?;
    let primary = build_provider(&args.provider, config, key1)?;
    let secondary = build_provider(&args.provider, config, key2)?;

    let text = read_input(&args.input)?;
    let file_name = display_file_name(args.source_pdf.as_deref(), &args.input);
    info!(input = %args.input.display(), file_name = %file_name, "Loaded input");

    let mut extractor = Extractor::new(primary, secondary, extraction).with_file_name(file_name);
    if show_progress {
        extractor = extractor.with_progress(MultiProgress::new());
    }

    let paths = OutputPaths::new(args.output_json, args.output_stats, args.live_output);
    let report = extractor.run(&text, &paths).await?;

    println!("{}", formatter.format_records(&report.records)?);
    println!("{}", formatter.report_summary(&report));
    println!("{}", formatter.success(&format!("Results saved to {}", paths.output_json.display())));
    println!("{}", formatter.info(&format!("Live log written to {}", paths.live_output.display())));
    println!("{}", formatter.info(&format!("Stats written to {}", paths.output_stats.display())));

    if let Some(summary) = &report.summary {
        println!("\n{}", summary);
        println!("{}", formatter.success(&format!("Summary saved to {}", paths.summary_path().display())));
    }

    Ok(())
}

/// Merge command-line flags over the config file's extraction settings.
pub fn resolve_config(args: &ExtractArgs, defaults: &ExtractorConfig) -> ExtractorConfig {
    ExtractorConfig {
        mode: args.mode.map(Into::into).unwrap_or(defaults.mode),
        max_chunk_size: args.max_chunk_size.unwrap_or(defaults.max_chunk_size),
        wait_time_secs: args.wait_time.unwrap_or(defaults.wait_time_secs),
        summarize: !args.no_summarize && (args.summarize || defaults.summarize),
    }
}

/// Name recorded on every result: the source PDF's file name when known,
/// otherwise the input file's.
pub fn display_file_name(source_pdf: Option<&Path>, input: &Path) -> String {
    source_pdf
        .and_then(Path::file_name)
        .or_else(|| input.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| casefile_extractor::DEFAULT_FILE_NAME.to_string())
}
