//! Fork/join extraction pipeline

use crate::chunking::split_units;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::output::{write_records, write_stats, write_summary, LiveLog, OutputPaths};
use crate::prompt::PromptBuilder;
use crate::summary::summarize;
use crate::types::{ExtractionReport, UnitRecord};
use crate::worker::Worker;
use casefile_domain::{LlmProvider, Partition, Unit, WorkerId};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Display name used when no source document name is configured
pub const DEFAULT_FILE_NAME: &str = "document";

/// Runs both workers over one document and aggregates their records
///
/// `primary` handles even unit indices and the summary call, `secondary`
/// handles odd indices. Each should carry its own API credential.
pub struct Extractor<P> {
    primary: Arc<P>,
    secondary: Arc<P>,
    config: ExtractorConfig,
    file_name: String,
    progress: Option<MultiProgress>,
}

impl<P> Extractor<P>
where
    P: LlmProvider + 'static,
{
    /// Create a new Extractor
    pub fn new(primary: P, secondary: P, config: ExtractorConfig) -> Self {
        Self {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
            config,
            file_name: DEFAULT_FILE_NAME.to_string(),
            progress: None,
        }
    }

    /// Set the source document name written to every record
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Draw one progress bar per worker on `progress`
    pub fn with_progress(mut self, progress: MultiProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Configuration of this extractor
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Units `text` would be split into
    pub fn split(&self, text: &str) -> Vec<Unit> {
        split_units(self.config.mode, text, self.config.max_chunk_size)
    }

    /// Extract case information from `text` and write every output file
    ///
    /// Both workers run concurrently. Once both are joined the collected
    /// records are sorted by unit index and written; a worker that stopped
    /// early is reported but does not discard the records it already sent.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or when an output file cannot be
    /// written.
    pub async fn run(&self, text: &str, paths: &OutputPaths) -> Result<ExtractionReport, ExtractorError> {
        self.config.validate().map_err(ExtractorError::Config)?;

        let units = self.split(text);
        info!(
            mode = %self.config.mode,
            units = units.len(),
            file_name = %self.file_name,
            "Starting extraction"
        );

        let mut partition = Partition::by_parity(units);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let prompts = Arc::new(PromptBuilder::new(self.config.mode));
        let live_log = Arc::new(LiveLog::new(&paths.live_output));
        let file_name: Arc<str> = Arc::from(self.file_name.as_str());

        let mut handles = Vec::with_capacity(WorkerId::ALL.len());
        for worker_id in WorkerId::ALL {
            let units = partition.take(worker_id);
            let provider = if worker_id == WorkerId::PRIMARY {
                Arc::clone(&self.primary)
            } else {
                Arc::clone(&self.secondary)
            };

            let worker = Worker::new(
                worker_id,
                provider,
                Arc::clone(&prompts),
                Arc::clone(&live_log),
                tx.clone(),
                Arc::clone(&file_name),
                &self.config,
            )
            .with_progress(self.progress_bar(worker_id, units.len()));

            handles.push((worker_id, tokio::spawn(worker.run(units))));
        }
        drop(tx);

        let mut workers = Vec::new();
        let mut worker_failures = Vec::new();
        for (worker_id, handle) in handles {
            match handle.await {
                Ok(Ok(report)) => workers.push(report),
                Ok(Err(e)) => {
                    error!(worker = %worker_id, error = %e, "Worker stopped early");
                    worker_failures.push((worker_id, e.to_string()));
                }
                Err(e) => {
                    error!(worker = %worker_id, error = %e, "Worker task panicked");
                    worker_failures.push((worker_id, e.to_string()));
                }
            }
        }

        let mut records = Vec::new();
        while let Some(record) = rx.recv().await {
            records.push(record);
        }
        aggregate(&mut records);

        write_records(&paths.output_json, &records)?;
        write_stats(&paths.output_stats, &records)?;

        let summary = if self.config.summarize {
            let text = summarize(self.primary.as_ref(), &records).await;
            write_summary(&paths.summary_path(), &text)?;
            Some(text)
        } else {
            None
        };

        info!(
            records = records.len(),
            failed = records.iter().filter(|r| r.content.is_error()).count(),
            "Extraction complete"
        );

        Ok(ExtractionReport {
            records,
            workers,
            worker_failures,
            summary,
        })
    }

    fn progress_bar(&self, worker: WorkerId, len: usize) -> ProgressBar {
        let Some(multi) = &self.progress else {
            return ProgressBar::hidden();
        };

        let style = ProgressStyle::with_template(
            "{prefix:.bold} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} units",
        )
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());

        let bar = multi.add(ProgressBar::new(len as u64));
        bar.set_style(style);
        bar.set_prefix(format!("Worker {}", worker));
        bar
    }
}

/// Sort records ascending by unit index
///
/// The sort is stable, so records sharing an index keep arrival order.
pub fn aggregate(records: &mut [UnitRecord]) {
    records.sort_by_key(|record| record.unit_index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UnitContent;
    use std::time::Duration;

    fn record(worker: WorkerId, index: usize, marker: &str) -> UnitRecord {
        UnitRecord::new(
            worker,
            &Unit::page(index, "p"),
            marker,
            Duration::ZERO,
            UnitContent::no_json(),
        )
    }

    #[test]
    fn test_aggregate_sorts_by_index() {
        let mut records = vec![
            record(WorkerId::SECONDARY, 3, "a"),
            record(WorkerId::PRIMARY, 0, "b"),
            record(WorkerId::SECONDARY, 1, "c"),
            record(WorkerId::PRIMARY, 2, "d"),
        ];
        aggregate(&mut records);

        let order: Vec<_> = records.iter().map(|r| r.unit_index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_aggregate_is_stable() {
        let mut records = vec![
            record(WorkerId::PRIMARY, 4, "first"),
            record(WorkerId::PRIMARY, 2, "x"),
            record(WorkerId::PRIMARY, 4, "second"),
        ];
        aggregate(&mut records);

        assert_eq!(records[1].file_name, "first");
        assert_eq!(records[2].file_name, "second");
    }
}
