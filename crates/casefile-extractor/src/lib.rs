//! Casefile Extractor
//!
//! Turns OCR-derived document text into structured case records by sending
//! one unit at a time to a chat-completion model.
//!
//! # Architecture
//!
//! ```text
//!                  ┌─ Worker 1 (even units, key 1) ─┐
//! Text → split ────┤                                ├─→ channel → sort → combined.json
//!                  └─ Worker 2 (odd units, key 2) ──┘                  └→ stats.json
//!                          │                                            └→ summary (optional)
//!                          └→ live log (JSON Lines, appended per unit)
//! ```
//!
//! # Key Features
//!
//! - **Three input modes**: fixed-width HTML or text chunks, or delimiter-marked pages
//! - **Two workers**: static even/odd split, one credential each, fixed pause after every call
//! - **JSON recovery**: first balanced JSON object in each reply, error markers otherwise
//! - **Durable progress**: every record lands in the live log before aggregation
//!
//! # Example Usage
//!
//! ```no_run
//! use casefile_extractor::{Extractor, ExtractorConfig, InputMode, OutputPaths};
//! use casefile_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractorConfig {
//!     mode: InputMode::Text,
//!     wait_time_secs: 0,
//!     ..Default::default()
//! };
//! let extractor = Extractor::new(
//!     MockProvider::new(r#"{"Clients": null}"#),
//!     MockProvider::new(r#"{"Clients": null}"#),
//!     config,
//! )
//! .with_file_name("records.pdf");
//!
//! let paths = OutputPaths::new("combined.json", "stats.json", "live.jsonl");
//! let report = extractor.run("OCR text ...", &paths).await?;
//!
//! println!("Records: {}", report.records.len());
//! println!("Failed units: {}", report.failed_units());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod output;
mod parser;
mod pipeline;
mod prompt;
mod summary;
mod types;
mod worker;


pub use chunking::{split_units, PageSplitter, TextChunker};
pub use config::{ExtractorConfig, InputMode};
pub use error::ExtractorError;
pub use output::{
    read_input, read_records, summary_path_for, write_records, write_stats, write_summary,
    LiveLog, OutputPaths,
};
pub use parser::{apply_page_provenance, first_json_object, recover_content, strip_key};
pub use pipeline::{aggregate, Extractor, DEFAULT_FILE_NAME};
pub use prompt::{build_summary_prompt, case_template, PromptBuilder};
pub use summary::{summarize, SUMMARY_ERROR_PREFIX};
pub use types::{ErrorMarker, ExtractionReport, UnitContent, UnitRecord, UnitStats, WorkerReport};
pub use worker::Worker;
