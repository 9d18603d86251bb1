//! Output files: live log, combined records, stats and summary

use crate::error::ExtractorError;
use crate::types::{UnitRecord, UnitStats};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

/// Destinations of one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Combined, sorted record array
    pub output_json: PathBuf,

    /// Stats array, same order, without content
    pub output_stats: PathBuf,

    /// Append-only JSON Lines log
    pub live_output: PathBuf,
}

impl OutputPaths {
    /// Bundle the three output paths
    pub fn new(
        output_json: impl Into<PathBuf>,
        output_stats: impl Into<PathBuf>,
        live_output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            output_json: output_json.into(),
            output_stats: output_stats.into(),
            live_output: live_output.into(),
        }
    }

    /// Where the summary for this run is written
    pub fn summary_path(&self) -> PathBuf {
        summary_path_for(&self.output_json)
    }
}

/// Append-only JSON Lines log shared by both workers
///
/// Every record is written as one compact line as soon as it is produced.
/// Appends are serialized so lines from the two workers never interleave.
#[derive(Debug)]
pub struct LiveLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LiveLog {
    /// Log appending to `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line
    pub fn append(&self, record: &UnitRecord) -> Result<(), ExtractorError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ExtractorError::io(&self.path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| ExtractorError::io(&self.path, e))
    }
}

/// Write the combined record array, overwriting `path`
pub fn write_records(path: &Path, records: &[UnitRecord]) -> Result<(), ExtractorError> {
    write_pretty(path, records)?;
    info!(path = %path.display(), records = records.len(), "Wrote combined results");
    Ok(())
}

/// Write the stats array (records without content), overwriting `path`
pub fn write_stats(path: &Path, records: &[UnitRecord]) -> Result<(), ExtractorError> {
    let stats: Vec<UnitStats> = records.iter().map(UnitRecord::stats).collect();
    write_pretty(path, &stats)?;
    info!(path = %path.display(), "Wrote stats");
    Ok(())
}

/// Summary file next to the combined output
///
/// A trailing `.json` becomes `_summary.txt`; any other name gets
/// `_summary.txt` appended.
pub fn summary_path_for(output_json: &Path) -> PathBuf {
    let raw = output_json.as_os_str().to_string_lossy();
    match raw.strip_suffix(".json") {
        Some(stem) => PathBuf::from(format!("{}_summary.txt", stem)),
        None => PathBuf::from(format!("{}_summary.txt", raw)),
    }
}

/// Write the summary text, overwriting `path`
pub fn write_summary(path: &Path, summary: &str) -> Result<(), ExtractorError> {
    fs::write(path, summary).map_err(|e| ExtractorError::io(path, e))?;
    info!(path = %path.display(), "Wrote summary");
    Ok(())
}

/// Read a combined record array written by [`write_records`]
pub fn read_records(path: &Path) -> Result<Vec<UnitRecord>, ExtractorError> {
    let raw = fs::read_to_string(path).map_err(|e| ExtractorError::io(path, e))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read an input document
pub fn read_input(path: &Path) -> Result<String, ExtractorError> {
    fs::read_to_string(path).map_err(|e| ExtractorError::io(path, e))
}

fn write_pretty<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ExtractorError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| ExtractorError::io(path, e))
}
