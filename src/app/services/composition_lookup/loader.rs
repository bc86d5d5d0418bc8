//! Composition table loading from a JSON-lines feedstock
//!
//! The whole feedstock is read into memory. Every document is parsed, including
//! the skipped ones, so a corrupt reference file fails the run up front rather
//! than at an arbitrary record.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::CompositionLookup;
use super::metadata::LoadStats;
use crate::constants::COMPOSITION_FIELD;
use crate::{Error, Result};

/// Compositions taken from another dataset's feedstock, after a fixed offset
#[derive(Debug, Clone)]
pub struct FeedstockCompositions {
    /// Feedstock the table was loaded from
    source_path: PathBuf,

    /// Leading documents skipped before index zero
    offset: usize,

    /// Addressable documents in feedstock order
    entries: Vec<CompositionEntry>,
}

#[derive(Debug, Clone)]
struct CompositionEntry {
    /// 1-based line of the document in the feedstock file
    line: usize,
    /// `None` when the document has no composition
    composition: Option<String>,
}

impl FeedstockCompositions {
    /// Load compositions from a JSON-lines feedstock file
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    /// * Returns `Error::InvalidFormat` for a line that is not valid JSON
    pub fn load(path: &Path, offset: usize) -> Result<(Self, LoadStats)> {
        info!(
            "Loading composition feedstock {} (offset {})",
            path.display(),
            offset
        );

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read composition feedstock {}", path.display()),
                e,
            )
        })?;

        Self::from_json_lines(&content, path, offset)
    }

    /// Build the table from JSON-lines text; `path` is used in reports only
    pub fn from_json_lines(content: &str, path: &Path, offset: usize) -> Result<(Self, LoadStats)> {
        let start_time = Instant::now();
        let mut stats = LoadStats::new(path.to_path_buf());
        let mut entries = Vec::new();

        for (line_index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let document: Value = serde_json::from_str(line).map_err(|e| {
                Error::invalid_format(
                    path.display().to_string(),
                    format!("line {} is not valid JSON: {}", line_index + 1, e),
                )
            })?;

            stats.documents_read += 1;
            if stats.documents_read <= offset {
                continue;
            }

            let composition = document
                .get(COMPOSITION_FIELD)
                .and_then(Value::as_str)
                .map(str::to_string);
            if composition.is_none() {
                stats.entries_without_composition += 1;
                debug!(
                    "Feedstock document {} has no {}",
                    stats.documents_read, COMPOSITION_FIELD
                );
            }
            entries.push(CompositionEntry {
                line: line_index + 1,
                composition,
            });
        }

        stats.documents_skipped = stats.documents_read.min(offset);
        stats.entries_loaded = entries.len();
        stats.load_duration = start_time.elapsed();

        if stats.documents_read < offset {
            warn!(
                "Composition feedstock {} holds {} documents, fewer than the offset {}",
                path.display(),
                stats.documents_read,
                offset
            );
        }
        info!("{}", stats.summary());

        Ok((
            Self {
                source_path: path.to_path_buf(),
                offset,
                entries,
            },
            stats,
        ))
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl CompositionLookup for FeedstockCompositions {
    fn composition(&self, index: usize) -> Result<&str> {
        match self.entries.get(index) {
            Some(CompositionEntry {
                composition: Some(composition),
                ..
            }) => Ok(composition),
            Some(CompositionEntry { line, .. }) => Err(Error::composition_missing(index, *line)),
            None => Err(Error::composition_index(
                index,
                self.offset,
                self.entries.len(),
            )),
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
