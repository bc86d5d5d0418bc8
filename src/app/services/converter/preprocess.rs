//! Preparation of the raw spectra file for the tabular parser
//!
//! The file opens with a free-text preamble of varying length. The table is
//! found by searching for the literal text of its first row, and every line
//! from there on is trimmed so rows start directly with the index column.

use std::path::Path;
use tracing::debug;

use crate::{Error, Result};

/// Parser-ready table text cut from a raw source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTable {
    /// Trimmed table lines joined by single newlines
    pub text: String,

    /// Byte offset of the first data row in the raw text
    pub start_offset: usize,

    /// 1-based line of the raw text holding the first data row
    pub first_line: usize,

    /// Number of non-blank table lines
    pub data_lines: usize,
}

/// Locate the table by its first row and trim every line
///
/// `file` only labels the error when the marker is absent.
pub fn prepare_table(raw: &str, marker: &str, file: &Path) -> Result<PreparedTable> {
    if marker.is_empty() {
        return Err(Error::configuration("First data row marker is empty"));
    }

    let start_offset = raw.find(marker).ok_or_else(|| {
        Error::invalid_format(
            file.display().to_string(),
            format!("first data row '{}' not found", marker.trim()),
        )
    })?;

    let first_line = raw[..start_offset].matches('\n').count() + 1;
    let lines: Vec<&str> = raw[start_offset..].lines().map(str::trim).collect();
    let data_lines = lines.iter().filter(|line| !line.is_empty()).count();

    debug!(
        "Table in {} starts at line {} with {} data lines",
        file.display(),
        first_line,
        data_lines
    );

    Ok(PreparedTable {
        text: lines.join("\n"),
        start_offset,
        first_line,
        data_lines,
    })
}
