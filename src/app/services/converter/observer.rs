//! Conversion lifecycle observers
//!
//! The converter reports its progress through a [`ConversionObserver`] at
//! three points: when a run starts, after each table line, and when the run
//! completes. Observers never influence the conversion itself.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, trace, warn};

use super::stats::ConversionReport;
use crate::app::services::feedstock_validator::SubmitOutcome;

/// Receiver of conversion lifecycle events
pub trait ConversionObserver {
    /// A run is starting on `source`, whose table holds `total_lines` data lines
    fn on_start(&self, _source: &Path, _total_lines: usize) {}

    /// Outcome of the `ordinal`-th table line (1-based)
    fn on_record(&self, _ordinal: usize, _outcome: &SubmitOutcome) {}

    /// The run finished without a fatal error
    fn on_complete(&self, _report: &ConversionReport) {}
}

impl<O: ConversionObserver + ?Sized> ConversionObserver for &O {
    fn on_start(&self, source: &Path, total_lines: usize) {
        (**self).on_start(source, total_lines)
    }

    fn on_record(&self, ordinal: usize, outcome: &SubmitOutcome) {
        (**self).on_record(ordinal, outcome)
    }

    fn on_complete(&self, report: &ConversionReport) {
        (**self).on_complete(report)
    }
}

impl<O: ConversionObserver + ?Sized> ConversionObserver for Box<O> {
    fn on_start(&self, source: &Path, total_lines: usize) {
        (**self).on_start(source, total_lines)
    }

    fn on_record(&self, ordinal: usize, outcome: &SubmitOutcome) {
        (**self).on_record(ordinal, outcome)
    }

    fn on_complete(&self, report: &ConversionReport) {
        (**self).on_complete(report)
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl ConversionObserver for SilentObserver {}

/// Observer that emits structured `tracing` events
///
/// Rejections are logged at warn level, accepted records at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ConversionObserver for TracingObserver {
    fn on_start(&self, source: &Path, total_lines: usize) {
        info!(
            "Begin converting {} ({} data lines)",
            source.display(),
            total_lines
        );
    }

    fn on_record(&self, ordinal: usize, outcome: &SubmitOutcome) {
        match outcome {
            SubmitOutcome::Accepted { position } => {
                trace!("Record {} accepted at feedstock position {}", ordinal, position)
            }
            SubmitOutcome::Rejected { message } => warn!("Error: {}", message),
        }
    }

    fn on_complete(&self, report: &ConversionReport) {
        info!("Finished converting: {}", report.summary());
    }
}

/// Observer that narrates a run on the console with a progress bar
///
/// Start and completion are printed to stdout; the bar and rejection
/// messages go to stderr. Every event is also passed to [`TracingObserver`].
#[derive(Default)]
pub struct ProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl std::fmt::Debug for ProgressObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self.bar.lock().map(|guard| guard.is_some()).unwrap_or(false);
        f.debug_struct("ProgressObserver")
            .field("active", &active)
            .finish()
    }
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message("Processing records");
        pb
    }

    fn with_bar(&self, action: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                action(pb);
            }
        }
    }
}

impl ConversionObserver for ProgressObserver {
    fn on_start(&self, source: &Path, total_lines: usize) {
        TracingObserver.on_start(source, total_lines);
        println!("Begin converting");

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(Self::create_progress_bar(total_lines as u64));
        }
    }

    fn on_record(&self, ordinal: usize, outcome: &SubmitOutcome) {
        TracingObserver.on_record(ordinal, outcome);
        self.with_bar(|pb| {
            if let SubmitOutcome::Rejected { message } = outcome {
                pb.println(format!("Error: {}", message));
            }
            pb.inc(1);
        });
    }

    fn on_complete(&self, report: &ConversionReport) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_with_message(format!("{} records written", report.records_accepted));
            }
        }

        TracingObserver.on_complete(report);
        println!("Finished converting");
    }
}
