//! Test utilities for feedstock validator testing

use serde_json::{Value, json};


/// Minimal dataset document that satisfies the dataset schema
pub fn valid_dataset_document() -> Value {
    json!({
        "mdf-title": "Test spectra",
        "mdf-acl": ["public"],
        "mdf-source_name": "test-spectra",
        "mdf-citation": ["A. Author, J. Test. 1 (2015)"],
        "mdf-data_contact": {
            "given_name": "Ada",
            "family_name": "Lovelace",
            "email": "ada@example.org"
        },
        "mdf-author": [{"given_name": "Ada", "family_name": "Lovelace"}],
        "mdf-license": "CC-BY-4.0",
        "mdf-collection": "test-spectra",
        "mdf-data_format": ["txt"],
        "mdf-data_type": ["DFT"],
        "mdf-description": "Spectra used in unit tests",
        "mdf-year": 2015,
        "mdf-links": {"mdf-landing_page": "https://example.org/test-spectra"}
    })
}

/// Record document with every required field
pub fn valid_record_document(index: usize) -> Value {
    json!({
        "mdf-title": format!("test - record: {}", index),
        "mdf-acl": ["public"],
        "mdf-composition": "C2H6O",
        "mdf-raw": format!(r#"{{"Index":"{}"}}"#, index),
        "mdf-links": {"mdf-landing_page": format!("https://example.org/data.txt#{}", index)}
    })
}

/// Remove a top-level field from a JSON object
pub fn without(mut document: Value, field: &str) -> Value {
    document
        .as_object_mut()
        .expect("test document is an object")
        .remove(field);
    document
}
