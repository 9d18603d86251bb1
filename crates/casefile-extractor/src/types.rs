//! Result records produced by the workers

use casefile_domain::{Unit, WorkerId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Marker stored in place of extracted content when a unit failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErrorMarker {
    /// Human-readable failure reason
    pub error: String,
}

/// Content of one unit's record
///
/// Serialized untagged: both variants appear as a bare JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitContent {
    /// The unit failed; `{"error": "..."}`
    Failed(ErrorMarker),

    /// The JSON object recovered from the model's reply
    Extracted(Value),
}

impl UnitContent {
    /// Message used when a reply contains no recoverable JSON object
    pub const NO_JSON_FOUND: &'static str = "No valid JSON found";

    /// Marker for a reply without a JSON object
    pub fn no_json() -> Self {
        UnitContent::Failed(ErrorMarker {
            error: Self::NO_JSON_FOUND.to_string(),
        })
    }

    /// Marker for a failed API call
    pub fn api_error(error: impl fmt::Display) -> Self {
        UnitContent::Failed(ErrorMarker {
            error: format!("API Error: {}", error),
        })
    }

    /// Whether this is an error marker
    pub fn is_error(&self) -> bool {
        matches!(self, UnitContent::Failed(_))
    }

    /// The extracted value, if any
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            UnitContent::Extracted(value) => Some(value),
            UnitContent::Failed(_) => None,
        }
    }

    /// The content as it appears in the combined file
    pub fn to_json(&self) -> Value {
        match self {
            UnitContent::Extracted(value) => value.clone(),
            UnitContent::Failed(marker) => serde_json::json!({ "error": marker.error }),
        }
    }

    /// The failure reason, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            UnitContent::Failed(marker) => Some(&marker.error),
            UnitContent::Extracted(_) => None,
        }
    }
}

/// One record per processed unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Worker that processed the unit (1 or 2)
    pub worker: u8,

    /// Chunk ordinal or page number
    pub unit_index: usize,

    /// Display name of the source document
    pub file_name: String,

    /// API round-trip in seconds, two decimal places
    pub duration: f64,

    /// Unit length in characters
    pub char_count: usize,

    /// Page estimate, chunk modes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_pages: Option<f64>,

    /// Recovered JSON or an error marker
    pub content: UnitContent,
}

impl UnitRecord {
    /// Build the record for a unit once its API call has finished
    pub fn new(
        worker: WorkerId,
        unit: &Unit,
        file_name: impl Into<String>,
        elapsed: Duration,
        content: UnitContent,
    ) -> Self {
        Self {
            worker: worker.value(),
            unit_index: unit.index,
            file_name: file_name.into(),
            duration: round2(elapsed.as_secs_f64()),
            char_count: unit.char_count(),
            estimated_pages: unit.estimated_pages(),
            content,
        }
    }

    /// Every field except the content
    pub fn stats(&self) -> UnitStats {
        UnitStats {
            worker: self.worker,
            unit_index: self.unit_index,
            file_name: self.file_name.clone(),
            duration: self.duration,
            char_count: self.char_count,
            estimated_pages: self.estimated_pages,
        }
    }
}

/// Record metadata written to the stats file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Worker that processed the unit
    pub worker: u8,
    /// Chunk ordinal or page number
    pub unit_index: usize,
    /// Display name of the source document
    pub file_name: String,
    /// API round-trip in seconds
    pub duration: f64,
    /// Unit length in characters
    pub char_count: usize,
    /// Page estimate, chunk modes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_pages: Option<f64>,
}

/// What one worker did over its half of the units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerReport {
    /// Worker id
    pub worker: WorkerId,
    /// Units attempted
    pub processed: usize,
    /// Units that ended with an error marker
    pub failed: usize,
}

impl WorkerReport {
    /// Empty report for a worker
    pub fn new(worker: WorkerId) -> Self {
        Self {
            worker,
            processed: 0,
            failed: 0,
        }
    }
}

/// Result of a full extraction run
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// All records, sorted by `unit_index`
    pub records: Vec<UnitRecord>,

    /// Reports of the workers that finished
    pub workers: Vec<WorkerReport>,

    /// Workers that stopped early, with the reason
    pub worker_failures: Vec<(WorkerId, String)>,

    /// Summary text, when summarization was enabled
    pub summary: Option<String>,
}

impl ExtractionReport {
    /// Number of records carrying an error marker
    pub fn failed_units(&self) -> usize {
        self.records.iter().filter(|r| r.content.is_error()).count()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
