//! Application constants for the gdb8-15 feedstock converter
//!
//! This module contains the dataset literals, default values, and file names
//! used throughout the converter.

// =============================================================================
// Source Table Layout
// =============================================================================

/// Name of the electronic spectra table inside the dataset directory
pub const DATA_FILE_NAME: &str = "gdb8_22k_elec_spec.txt";

/// Column headers of the electronic spectra table, in file order
///
/// The PBE0 block appears twice in the source table (two basis sets) under the
/// same names, so the second block overwrites the first within a record.
pub const GDB8_15_HEADERS: &[&str] = &[
    "Index", "E1-CC2", "E2-CC2", "f1-CC2", "f2-CC2", "E1-PBE0", "E2-PBE0", "f1-PBE0", "f2-PBE0",
    "E1-PBE0", "E2-PBE0", "f1-PBE0", "f2-PBE0", "E1-CAM", "E2-CAM", "f1-CAM", "f2-CAM",
];

/// Literal text that begins the first data row, after the free-text preamble
pub const FIRST_DATA_ROW_MARKER: &str = "       1      0.43295186     0.43295958";

/// Column separator used by the source table
pub const DEFAULT_SEPARATOR: &str = "     ";

/// Header naming the column that carries the molecule index
pub const INDEX_COLUMN: &str = "Index";

// =============================================================================
// Composition Cross-Reference
// =============================================================================

/// Feedstock file of the sibling gdb9-14 dataset that supplies compositions
pub const COMPOSITION_FEEDSTOCK_FILE: &str = "gdb9-14_all.json";

/// Number of leading gdb9-14 feedstock documents that belong to another sub-collection
pub const COMPOSITION_OFFSET: usize = 6095;

/// Field holding the composition in feedstock documents
pub const COMPOSITION_FIELD: &str = "mdf-composition";

// =============================================================================
// Feedstock Output
// =============================================================================

/// Source name of the gdb8-15 dataset
pub const SOURCE_NAME: &str = "gdb8-15";

/// Default output feedstock file name
pub const OUTPUT_FEEDSTOCK_FILE: &str = "gdb8-15_all.json";

/// Default directory holding feedstock files
pub const FEEDSTOCK_DIR: &str = "feedstock";

/// Base URL for per-record landing pages; the record index is appended as a fragment
pub const RECORD_LANDING_PAGE_BASE: &str =
    "https://data.materialsdatafacility.org/collections/gdb-8-15/gdb8_22k_elec_spec.txt#";

/// Visibility token for openly accessible documents
pub const PUBLIC_ACL: &str = "public";

/// Marker distinguishing the dataset entry from record entries in a feedstock
pub mod resource_type {
    pub const DATASET: &str = "dataset";
    pub const RECORD: &str = "record";
}

// =============================================================================
// Logging
// =============================================================================

/// Application name for logging and the default config directory
pub const APP_NAME: &str = "mdf-feedstock";

/// Tracing target prefix used in the default log filter
pub const LOG_TARGET: &str = "mdf_feedstock";

/// Default config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
