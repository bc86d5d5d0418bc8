//! Test utilities for tabular parser testing

use crate::app::services::tab_parser::{Separator, TabularParser};

mod separator_tests;

/// Headers of the first three gdb8-15 columns
pub const SHORT_HEADERS: &[&str] = &["Index", "E1-CC2", "E2-CC2"];

/// Five-space literal separator used by the gdb8-15 table
pub fn five_spaces() -> Separator {
    Separator::literal("     ").unwrap()
}

/// Three data lines shaped like the gdb8-15 table after line stripping
pub fn create_short_table() -> String {
    [
        "1      0.43295186     0.43295958",
        "2      0.25043410     0.26262981",
        "3      0.34823596     0.38629720",
    ]
    .join("\n")
}

/// Collect every record of a pass, panicking on the first error
pub fn collect_ok(parser: &TabularParser<'_>) -> Vec<crate::app::models::Record> {
    parser.records().map(|r| r.unwrap()).collect()
}
