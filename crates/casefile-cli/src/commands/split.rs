//! Split command implementation.

use crate::cli::SplitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use casefile_domain::Partition;
use casefile_extractor::{read_input, split_units, ExtractorConfig};

/// Execute the split command.
pub fn execute_split(args: SplitArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let settings = ExtractorConfig {
        mode: args.mode.map(Into::into).unwrap_or(config.extraction.mode),
        max_chunk_size: args.max_chunk_size.unwrap_or(config.extraction.max_chunk_size),
        ..config.extraction.clone()
    };
    settings.validate().map_err(CliError::Config)?;

    let text = read_input(&args.input)?;
    let units = split_units(settings.mode, &text, settings.max_chunk_size);

    println!("{}", formatter.format_units(&units)?);

    let total = units.len();
    let partition = Partition::by_parity(units);
    println!(
        "{}",
        formatter.info(&format!(
            "{} unit(s) in {} mode: worker 1 gets {}, worker 2 gets {}",
            total,
            settings.mode,
            partition.primary.len(),
            partition.secondary.len()
        ))
    );

    Ok(())
}
