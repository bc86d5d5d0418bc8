//! Per-record metadata assembly

use crate::app::models::{Record, RecordLinks, RecordMetadata};
use crate::constants::{INDEX_COLUMN, PUBLIC_ACL, RECORD_LANDING_PAGE_BASE, SOURCE_NAME};
use crate::Result;

/// Index of a parsed table row, as written in the file and as a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIndex {
    pub label: String,
    pub value: usize,
}

impl RecordIndex {
    /// Read the index column of a record
    ///
    /// Returns the reason as `Err` when the column is absent or not an
    /// unsigned integer.
    pub fn from_record(record: &Record) -> std::result::Result<Self, String> {
        let label = record
            .get(INDEX_COLUMN)
            .ok_or_else(|| format!("record has no {} column", INDEX_COLUMN))?;

        let value = label
            .parse::<usize>()
            .map_err(|_| format!("{} '{}' is not an unsigned integer", INDEX_COLUMN, label))?;

        Ok(Self {
            label: label.to_string(),
            value,
        })
    }
}

/// Title of a gdb8-15 record entry
pub fn record_title(label: &str) -> String {
    format!("{} - record: {}", SOURCE_NAME, label)
}

/// Landing page of a gdb8-15 record inside the published data file
pub fn record_landing_page(label: &str) -> String {
    format!("{}{}", RECORD_LANDING_PAGE_BASE, label)
}

/// Build the metadata submitted for one parsed row
pub fn build_record_metadata(
    record: &Record,
    index: &RecordIndex,
    composition: &str,
) -> Result<RecordMetadata> {
    let raw = record.to_json()?;

    Ok(RecordMetadata::new(
        record_title(&index.label),
        vec![PUBLIC_ACL.to_string()],
        composition,
        raw,
        RecordLinks::landing_page(record_landing_page(&index.label)),
    ))
}
