//! Conversion statistics and reporting

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one conversion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Source name of the dataset the feedstock was written for
    pub source_name: String,

    /// Data file that was converted
    pub input_path: PathBuf,

    /// Feedstock written, when the run used a file sink
    pub output_path: Option<PathBuf>,

    /// Table lines produced by the parser, including ones that failed to parse
    pub records_parsed: usize,

    /// Records written to the feedstock
    pub records_accepted: usize,

    /// Records rejected by validation or index checks
    pub records_rejected: usize,

    /// Lines that could not be split into a record
    pub parse_failures: usize,

    /// Diagnostic of every rejected record or failed line, in file order
    pub messages: Vec<String>,

    /// Wall-clock time of the run
    pub elapsed: Duration,
}

impl ConversionReport {
    pub fn new(source_name: impl Into<String>, input_path: impl Into<PathBuf>) -> Self {
        Self {
            source_name: source_name.into(),
            input_path: input_path.into(),
            ..Default::default()
        }
    }

    /// Records that did not make it into the feedstock
    pub fn records_failed(&self) -> usize {
        self.records_rejected + self.parse_failures
    }

    /// Percentage of parsed lines written to the feedstock
    pub fn success_rate(&self) -> f64 {
        if self.records_parsed == 0 {
            0.0
        } else {
            (self.records_accepted as f64 / self.records_parsed as f64) * 100.0
        }
    }

    /// Whether every parsed line was written
    pub fn is_complete(&self) -> bool {
        self.records_failed() == 0
    }

    /// Records written per second
    pub fn throughput(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.records_accepted as f64 / seconds
        } else {
            0.0
        }
    }

    pub(crate) fn record_rejection(&mut self, message: String) {
        self.records_rejected += 1;
        self.messages.push(message);
    }

    pub(crate) fn record_parse_failure(&mut self, message: String) {
        self.parse_failures += 1;
        self.messages.push(message);
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "{}: {} parsed, {} accepted, {} rejected, {} unparseable ({:.1}% success) in {:.2}s",
            self.source_name,
            self.records_parsed,
            self.records_accepted,
            self.records_rejected,
            self.parse_failures,
            self.success_rate(),
            self.elapsed.as_secs_f64()
        )
    }
}
