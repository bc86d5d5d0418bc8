//! Shared test utilities and fixtures for converter tests

use std::cell::RefCell;
use std::path::Path;

use crate::app::services::composition_lookup::CompositionTable;
use crate::app::services::converter::{ConversionObserver, ConversionReport};
use crate::app::services::feedstock_validator::SubmitOutcome;
use crate::constants::{FIRST_DATA_ROW_MARKER, GDB8_15_HEADERS};

mod pipeline_tests;

/// Free-text preamble that precedes the table in the published file
pub const PREAMBLE: &str = "\
Electronic spectra of 22k molecules, gdb8-15
Columns: Index, E1-CC2, E2-CC2, f1-CC2, f2-CC2, E1-PBE0, E2-PBE0, ...
   Energies in Hartree
";

/// Values after the index column of row `index`, one per remaining header
pub fn spectra_values(index: usize) -> Vec<String> {
    (1..GDB8_15_HEADERS.len())
        .map(|column| format!("{:.8}", index as f64 * 0.01 + column as f64 * 0.001))
        .collect()
}

/// One table row laid out like the published file
pub fn spectra_row(index: usize) -> String {
    format!("{:>8}      {}", index, spectra_values(index).join("     "))
}

/// The published first row: the marker followed by the remaining columns
pub fn first_spectra_row() -> String {
    let rest: Vec<String> = spectra_values(1).into_iter().skip(2).collect();
    format!("{}     {}", FIRST_DATA_ROW_MARKER, rest.join("     "))
}

/// Preamble plus rows 1 to `rows`
pub fn create_spectra_text(rows: usize) -> String {
    let mut text = String::from(PREAMBLE);
    text.push_str(&first_spectra_row());
    text.push('\n');
    for index in 2..=rows {
        text.push_str(&spectra_row(index));
        text.push('\n');
    }
    text
}

/// Composition table addressable from index 0 to `last_index`
pub fn create_compositions(last_index: usize) -> CompositionTable {
    (0..=last_index)
        .map(|i| format!("C{}H{}", i, 2 * i))
        .collect()
}

pub fn source_path() -> &'static Path {
    Path::new("gdb8_22k_elec_spec.txt")
}

/// Observer that remembers every event
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub started: RefCell<Vec<usize>>,
    pub outcomes: RefCell<Vec<(usize, SubmitOutcome)>>,
    pub completed: RefCell<Vec<usize>>,
}

impl ConversionObserver for RecordingObserver {
    fn on_start(&self, _source: &Path, total_lines: usize) {
        self.started.borrow_mut().push(total_lines);
    }

    fn on_record(&self, ordinal: usize, outcome: &SubmitOutcome) {
        self.outcomes.borrow_mut().push((ordinal, outcome.clone()));
    }

    fn on_complete(&self, report: &ConversionReport) {
        self.completed.borrow_mut().push(report.records_accepted);
    }
}
