//! One worker: a sequential loop over its half of the units

use crate::config::{ExtractorConfig, InputMode};
use crate::error::ExtractorError;
use crate::output::LiveLog;
use crate::parser::{apply_page_provenance, recover_content};
use crate::prompt::PromptBuilder;
use crate::types::{UnitContent, UnitRecord, WorkerReport};
use casefile_domain::{LlmProvider, Unit, WorkerId};
use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Processes units one at a time against a single credential
///
/// Each unit gets exactly one API call. The worker sleeps the configured
/// interval after every unit, successful or not.
pub struct Worker<P> {
    id: WorkerId,
    provider: Arc<P>,
    prompts: Arc<PromptBuilder>,
    live_log: Arc<LiveLog>,
    results: UnboundedSender<UnitRecord>,
    file_name: Arc<str>,
    wait_time: Duration,
    progress: ProgressBar,
}

impl<P> Worker<P>
where
    P: LlmProvider + 'static,
{
    /// Create a worker; progress is hidden until [`Worker::with_progress`]
    pub fn new(
        id: WorkerId,
        provider: Arc<P>,
        prompts: Arc<PromptBuilder>,
        live_log: Arc<LiveLog>,
        results: UnboundedSender<UnitRecord>,
        file_name: Arc<str>,
        config: &ExtractorConfig,
    ) -> Self {
        Self {
            id,
            provider,
            prompts,
            live_log,
            results,
            file_name,
            wait_time: config.wait_time(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress on `bar`
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Process `units` in order
    ///
    /// API failures and replies without JSON become error markers and the
    /// loop continues. A live-log write failure stops the worker.
    pub async fn run(self, units: Vec<Unit>) -> Result<WorkerReport, ExtractorError> {
        info!(worker = %self.id, units = units.len(), model = self.provider.model_name(), "Worker starting");
        self.progress.set_length(units.len() as u64);

        let mut report = WorkerReport::new(self.id);
        for unit in &units {
            let record = self.process(unit).await;

            report.processed += 1;
            if record.content.is_error() {
                report.failed += 1;
            }

            self.live_log.append(&record)?;
            if self.results.send(record).is_err() {
                warn!(worker = %self.id, unit = unit.index, "Result channel closed");
            }
            self.progress.inc(1);

            tokio::time::sleep(self.wait_time).await;
        }

        self.progress.finish();
        info!(
            worker = %self.id,
            processed = report.processed,
            failed = report.failed,
            "Worker finished"
        );
        Ok(report)
    }

    async fn process(&self, unit: &Unit) -> UnitRecord {
        let prompt = self.prompts.build(unit, &self.file_name);
        debug!(worker = %self.id, unit = unit.index, prompt_chars = prompt.len(), "Sending unit");

        let start = Instant::now();
        let content = match self.provider.generate(&prompt).await {
            Ok(reply) => {
                let mut content = recover_content(&reply);
                if let (InputMode::Pages, UnitContent::Extracted(value)) =
                    (self.prompts.mode(), &mut content)
                {
                    apply_page_provenance(value, unit.index, &self.file_name);
                }
                content
            }
            Err(e) => {
                warn!(worker = %self.id, unit = unit.index, error = %e, "API call failed");
                UnitContent::api_error(e)
            }
        };
        let elapsed = start.elapsed();

        if let Some(reason) = content.error_message() {
            warn!(worker = %self.id, unit = unit.index, reason, "Unit produced no content");
        }
        info!(
            worker = %self.id,
            unit = unit.index,
            duration_secs = elapsed.as_secs_f64(),
            "Unit completed"
        );

        UnitRecord::new(self.id, unit, self.file_name.as_ref(), elapsed, content)
    }
}
