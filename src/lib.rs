//! MDF Feedstock Library
//!
//! A Rust library for converting the gdb8-15 electronic spectra dataset
//! (TDDFT and CC2 excitation energies for ~22,000 small organic molecules)
//! into Materials Data Facility feedstock.
//!
//! This library provides tools for:
//! - Parsing irregularly spaced, whitespace-delimited tables into ordered records
//! - Validating dataset and record metadata against embedded JSON schemas
//! - Writing accepted records to a newline-delimited JSON feedstock
//! - Enriching records with compositions from a sibling dataset's feedstock
//! - Reporting conversion progress through pluggable observers

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod composition_lookup;
        pub mod converter;
        pub mod feedstock_validator;
        pub mod tab_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DatasetMetadata, Record, RecordMetadata};
pub use app::services::converter::{ConversionReport, MetadataSource, convert};
pub use app::services::feedstock_validator::{SubmitOutcome, Validator};
pub use app::services::tab_parser::{ColumnPolicy, Separator, TabularParser};
pub use config::Config;

/// Result type alias for feedstock conversion
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feedstock conversion
///
/// Every variant here is fatal to a conversion run. Per-record schema
/// rejections are reported through [`SubmitOutcome::Rejected`] instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Dataset metadata could not be read as inline JSON or from a file
    #[error("Unable to read metadata: {message}")]
    MetadataUnreadable { message: String },

    /// Document failed schema validation
    #[error("Schema error in {document}: {}", .violations.join("; "))]
    Schema {
        document: String,
        violations: Vec<String>,
    },

    /// Source file does not have the expected layout
    #[error("Invalid format in '{file}': {message}")]
    InvalidFormat { file: String, message: String },

    /// A table line did not split into the expected number of fields
    #[error("Line {line}: expected {expected} fields, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Composition index falls outside the cross-reference table
    #[error(
        "Composition index {index} out of range: table holds {available} entries after skipping {offset}"
    )]
    CompositionIndex {
        index: usize,
        offset: usize,
        available: usize,
    },

    /// Cross-reference entry has no usable composition
    #[error("Composition missing for index {index} (feedstock line {line})")]
    CompositionMissing { index: usize, line: usize },

    /// Feedstock sink was used after it was closed
    #[error("Feedstock sink is closed")]
    SinkClosed,
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a metadata unreadable error
    pub fn metadata_unreadable(message: impl Into<String>) -> Self {
        Self::MetadataUnreadable {
            message: message.into(),
        }
    }

    /// Create a schema validation error
    pub fn schema(document: impl Into<String>, violations: Vec<String>) -> Self {
        Self::Schema {
            document: document.into(),
            violations,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a column count mismatch error
    pub fn column_count(line: usize, expected: usize, found: usize) -> Self {
        Self::ColumnCount {
            line,
            expected,
            found,
        }
    }

    /// Create a composition index error
    pub fn composition_index(index: usize, offset: usize, available: usize) -> Self {
        Self::CompositionIndex {
            index,
            offset,
            available,
        }
    }

    /// Create a missing composition error
    pub fn composition_missing(index: usize, line: usize) -> Self {
        Self::CompositionMissing { index, line }
    }

    /// Whether this error only affects a single table line
    pub fn is_record_level(&self) -> bool {
        matches!(self, Self::ColumnCount { .. })
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON processing failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid configuration file: {}", error),
        }
    }
}
