//! Validator binding one dataset's metadata to a feedstock sink
//!
//! Lifecycle: construction validates the dataset document and writes the
//! dataset entry (the validator is then open); [`Validator::finish`] consumes
//! the validator and closes the sink. A validator that failed construction
//! never exists, so no record can be accepted without a valid dataset.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::schema;
use super::sink::FeedstockSink;
use crate::app::models::{DatasetMetadata, RecordMetadata};
use crate::constants::resource_type;
use crate::{Error, Result};

/// Dataset fields copied into a record entry when the record leaves them out
pub const INHERITED_FIELDS: &[&str] = &[
    "mdf-citation",
    "mdf-data_contact",
    "mdf-author",
    "mdf-license",
    "mdf-collection",
    "mdf-data_format",
    "mdf-data_type",
    "mdf-year",
];

/// Result of submitting one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SubmitOutcome {
    /// Record written; `position` is its 1-based place among written records
    Accepted { position: usize },
    /// Record failed validation and was not written
    Rejected { message: String },
}

impl SubmitOutcome {
    pub fn success(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Diagnostic for a rejected record
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { message } => Some(message),
        }
    }
}

/// Totals reported when a validator is finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub source_name: String,
    pub records_submitted: usize,
    pub records_accepted: usize,
    pub records_rejected: usize,
}

/// Schema-validating writer for one dataset's feedstock
pub struct Validator<S: FeedstockSink> {
    dataset: DatasetMetadata,
    dataset_entry: Map<String, Value>,
    record_validator: jsonschema::Validator,
    sink: S,
    submitted: usize,
    rejected: usize,
}

impl<S: FeedstockSink> std::fmt::Debug for Validator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("source_name", &self.dataset.source_name)
            .field("submitted", &self.submitted)
            .field("rejected", &self.rejected)
            .finish()
    }
}

impl<S: FeedstockSink> Validator<S> {
    /// Validate a dataset document and open the feedstock
    ///
    /// # Errors
    /// * `Error::Schema` if the document violates the dataset schema
    /// * `Error::Io` if the dataset entry cannot be written
    pub fn new(document: Value, mut sink: S) -> Result<Self> {
        let dataset = Self::check_dataset(&document)?;

        let Value::Object(mut dataset_entry) = document else {
            return Err(Error::schema(
                "dataset metadata",
                vec!["document is not a JSON object".to_string()],
            ));
        };
        dataset_entry.insert(
            "mdf-resource_type".to_string(),
            Value::String(resource_type::DATASET.to_string()),
        );

        let record_validator = schema::compile(schema::record_schema())?;

        sink.write_dataset(&Value::Object(dataset_entry.clone()))?;
        info!(
            "Validated dataset metadata for '{}' ({})",
            dataset.source_name, dataset.title
        );

        Ok(Self {
            dataset,
            dataset_entry,
            record_validator,
            sink,
            submitted: 0,
            rejected: 0,
        })
    }

    /// Check a dataset document without opening a sink
    ///
    /// Returns `Error::Schema` for schema violations and for documents the
    /// typed model cannot hold.
    pub fn check_dataset(document: &Value) -> Result<DatasetMetadata> {
        let found = schema::dataset_violations(document)?;
        if !found.is_empty() {
            return Err(Error::schema("dataset metadata", found));
        }

        DatasetMetadata::from_value(document.clone()).map_err(|e| {
            Error::schema(
                "dataset metadata",
                vec![format!("does not match the dataset model: {}", e)],
            )
        })
    }

    /// Validate typed dataset metadata and open the feedstock
    pub fn from_metadata(metadata: &DatasetMetadata, sink: S) -> Result<Self> {
        Self::new(metadata.to_value()?, sink)
    }

    /// The validated dataset metadata this validator is bound to
    pub fn dataset(&self) -> &DatasetMetadata {
        &self.dataset
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.sink.record_count()
    }

    /// Validate and write typed record metadata
    pub fn submit(&mut self, record: &RecordMetadata) -> Result<SubmitOutcome> {
        self.submit_value(record.to_value()?)
    }

    /// Validate and write a record document
    ///
    /// Schema violations reject only this record and leave the sink untouched.
    /// `Err` is returned only when the sink itself fails.
    pub fn submit_value(&mut self, document: Value) -> Result<SubmitOutcome> {
        self.submitted += 1;

        let mut found = schema::violations(&self.record_validator, &document);
        found.extend(schema::record_content_violations(&document));

        let mut entry = match document {
            Value::Object(map) if found.is_empty() => map,
            _ => {
                self.rejected += 1;
                let message = format!("Invalid record metadata: {}", found.join("; "));
                debug!("Rejected record {}: {}", self.submitted, message);
                return Ok(SubmitOutcome::Rejected { message });
            }
        };

        self.annotate(&mut entry);
        self.sink.write_record(&Value::Object(entry))?;

        Ok(SubmitOutcome::Accepted {
            position: self.sink.record_count(),
        })
    }

    /// Close the feedstock and report totals
    pub fn finish(mut self) -> Result<WriteSummary> {
        self.sink.finish()?;

        let summary = WriteSummary {
            source_name: self.dataset.source_name.clone(),
            records_submitted: self.submitted,
            records_accepted: self.sink.record_count(),
            records_rejected: self.rejected,
        };

        info!(
            "Closed feedstock for '{}': {} accepted, {} rejected",
            summary.source_name, summary.records_accepted, summary.records_rejected
        );

        Ok(summary)
    }

    fn annotate(&self, entry: &mut Map<String, Value>) {
        entry.insert(
            "mdf-resource_type".to_string(),
            Value::String(resource_type::RECORD.to_string()),
        );
        entry.insert(
            "mdf-source_name".to_string(),
            Value::String(self.dataset.source_name.clone()),
        );

        for field in INHERITED_FIELDS {
            if entry.contains_key(*field) {
                continue;
            }
            if let Some(value) = self.dataset_entry.get(*field) {
                entry.insert((*field).to_string(), value.clone());
            }
        }
    }
}
