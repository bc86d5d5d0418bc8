//! Embedded JSON schemas for MDF metadata documents
//!
//! Schemas are embedded at compile time from the `schemas/` directory:
//! - `mdf-dataset.json` - dataset entry written once per feedstock
//! - `mdf-record.json` - one entry per accepted record

use chrono::Datelike;
use serde_json::Value;
use std::sync::LazyLock;

use crate::{Error, Result};

static DATASET_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../../../schemas/mdf-dataset.json"))
        .expect("Invalid embedded dataset schema")
});

static RECORD_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../../../schemas/mdf-record.json"))
        .expect("Invalid embedded record schema")
});

/// The dataset metadata schema document
pub fn dataset_schema() -> &'static Value {
    &DATASET_SCHEMA
}

/// The record metadata schema document
pub fn record_schema() -> &'static Value {
    &RECORD_SCHEMA
}

/// Compile a draft 7 schema
pub fn compile(schema: &Value) -> Result<jsonschema::Validator> {
    jsonschema::draft7::new(schema)
        .map_err(|e| Error::configuration(format!("Invalid JSON schema: {}", e)))
}

/// Every schema violation of `document`, as readable messages
pub fn violations(validator: &jsonschema::Validator, document: &Value) -> Vec<String> {
    validator
        .iter_errors(document)
        .map(|e| e.to_string())
        .collect()
}

/// Validate a dataset document, returning all violations
///
/// Beyond the schema, the publication year must be written as a whole number
/// and may not lie more than one year in the future.
pub fn dataset_violations(document: &Value) -> Result<Vec<String>> {
    let validator = compile(dataset_schema())?;
    let mut found = violations(&validator, document);

    if let Some(value) = document.get("mdf-year").filter(|value| value.is_number()) {
        match value.as_i64().and_then(|year| i32::try_from(year).ok()) {
            Some(year) => {
                let latest = chrono::Utc::now().year() + 1;
                if year > latest {
                    found.push(format!("mdf-year {} is later than {}", year, latest));
                }
            }
            None => found.push(format!("mdf-year {} is not a whole calendar year", value)),
        }
    }

    Ok(found)
}

/// Checks on a record document that a schema cannot express
///
/// `mdf-raw` must hold the JSON text of an object.
pub fn record_content_violations(document: &Value) -> Vec<String> {
    let mut found = Vec::new();

    if let Some(raw) = document.get("mdf-raw").and_then(Value::as_str) {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(_)) => {}
            Ok(_) => found.push("mdf-raw is not a JSON object".to_string()),
            Err(e) => found.push(format!("mdf-raw is not valid JSON: {}", e)),
        }
    }

    found
}
