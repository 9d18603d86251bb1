//! CLI command definitions and argument parsing.

use casefile_extractor::InputMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Casefile - extract structured case information from OCR text.
#[derive(Debug, Parser)]
#[command(name = "casefile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path (default: ~/.casefile/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a document, send every unit to the model and write the results
    Extract(ExtractArgs),

    /// Summarize an existing combined results file
    Summarize(SummarizeArgs),

    /// Show how a document would be split, without calling the API
    Split(SplitArgs),
}

/// Model connection arguments shared by commands that call the API.
#[derive(Debug, Args)]
pub struct ProviderArgs {
    /// Chat model name
    #[arg(long)]
    pub model: Option<String>,

    /// API base URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// API key for the first worker and the summary call
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input document (OCR text, HTML export or page-delimited text)
    #[arg(short, long, aliases = ["input_text", "input_html"])]
    pub input: PathBuf,

    /// Combined results file (JSON array)
    #[arg(long, alias = "output_json")]
    pub output_json: PathBuf,

    /// Per-unit stats file (JSON array, no content)
    #[arg(long, alias = "output_stats")]
    pub output_stats: PathBuf,

    /// Live log, appended one JSON line per unit
    #[arg(long, alias = "live_output")]
    pub live_output: PathBuf,

    /// Maximum chunk size in characters [default: 10000]
    #[arg(long, alias = "max_chunk_size")]
    pub max_chunk_size: Option<usize>,

    /// Pause after every request, in seconds [default: 60]
    #[arg(long, alias = "wait_time")]
    pub wait_time: Option<u64>,

    /// How to split the input [default: text]
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Write a bullet-point summary next to the combined results
    #[arg(long)]
    pub summarize: bool,

    /// Skip the summary even when the config file enables it
    #[arg(long, conflicts_with = "summarize")]
    pub no_summarize: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,

    /// API key for the second worker
    #[arg(long = "api-key2", env = "MISTRAL_API_KEY2", hide_env_values = true)]
    pub api_key2: Option<String>,

    /// Source PDF; its file name is recorded on every result
    #[arg(long, env = "PDF_PATH")]
    pub source_pdf: Option<PathBuf>,
}

/// Arguments for the summarize command.
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Combined results file written by `extract`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Summary file [default: <input>_summary.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

/// Arguments for the split command.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Input document
    #[arg(short, long, aliases = ["input_text", "input_html"])]
    pub input: PathBuf,

    /// How to split the input [default: text]
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Maximum chunk size in characters [default: 10000]
    #[arg(long, alias = "max_chunk_size")]
    pub max_chunk_size: Option<usize>,
}

/// Input mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Fixed-width chunks of an HTML export
    Html,
    /// Fixed-width chunks of OCR plain text
    Text,
    /// Delimiter-marked pages
    Pages,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

impl From<ModeArg> for InputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Html => InputMode::Html,
            ModeArg::Text => InputMode::Text,
            ModeArg::Pages => InputMode::Pages,
        }
    }
}
