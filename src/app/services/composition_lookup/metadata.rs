//! Composition table loading statistics

use std::path::PathBuf;
use std::time::Duration;

/// Statistics about loading a composition feedstock
#[derive(Debug, Clone, PartialEq)]
pub struct LoadStats {
    /// Feedstock file the table was loaded from
    pub source_path: PathBuf,

    /// Documents read from the feedstock
    pub documents_read: usize,

    /// Leading documents skipped as belonging to another sub-collection
    pub documents_skipped: usize,

    /// Addressable entries after the offset
    pub entries_loaded: usize,

    /// Addressable entries without a string composition
    pub entries_without_composition: usize,

    /// Time taken to load the table
    pub load_duration: Duration,
}

impl LoadStats {
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            source_path,
            documents_read: 0,
            documents_skipped: 0,
            entries_loaded: 0,
            entries_without_composition: 0,
            load_duration: Duration::ZERO,
        }
    }

    /// Get a summary string of the loading process
    pub fn summary(&self) -> String {
        format!(
            "Read {} documents from {}, skipped {}, loaded {} compositions ({} missing) in {:.2}s",
            self.documents_read,
            self.source_path.display(),
            self.documents_skipped,
            self.entries_loaded,
            self.entries_without_composition,
            self.load_duration.as_secs_f64()
        )
    }
}
