//! Casefile CLI - extract structured case information from OCR text.

use casefile_cli::commands;
use casefile_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> casefile_cli::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let show_progress = !cli.quiet && config.settings.progress;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &config, &formatter, show_progress).await?;
        }
        Command::Summarize(args) => {
            commands::execute_summarize(args, &config, &formatter).await?;
        }
        Command::Split(args) => {
            commands::execute_split(args, &config, &formatter)?;
        }
    }

    Ok(())
}
