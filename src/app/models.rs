//! Data models for feedstock conversion
//!
//! This module contains the core data structures for parsed table records and
//! for the dataset-level and record-level metadata documents that make up a
//! Materials Data Facility feedstock.

use crate::Result;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

// =============================================================================
// Parsed Table Record
// =============================================================================

/// One parsed table line: header names mapped to field values in header order
///
/// Inserting a name that already exists replaces its value but keeps its
/// original position, so the record behaves like an insertion-ordered map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Create an empty record with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Set a field value, returning the previous value if the name was present
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Get a field value by header name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Header names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Field values in order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// Iterate over `(name, value)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compact JSON object text of the record, keys in header order
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| crate::Error::json("Failed to serialize record", e))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

// =============================================================================
// People and Links
// =============================================================================

/// A person named in dataset metadata (author, contact, contributor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub given_name: String,
    pub family_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Person {
    pub fn new(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
            email: None,
            institution: None,
            github: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    pub fn with_github(mut self, github: impl Into<String>) -> Self {
        self.github = Some(github.into());
        self
    }
}

/// Transfer locations for the raw data files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globus_endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Links block of the dataset entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetLinks {
    #[serde(rename = "mdf-landing_page")]
    pub landing_page: String,

    #[serde(
        rename = "mdf-publication",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub publication: Vec<String>,

    #[serde(
        rename = "mdf-dataset_doi",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dataset_doi: Option<String>,

    #[serde(
        rename = "mdf-related_id",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub related_id: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_links: Option<DataLinks>,
}

/// Links block of a record entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLinks {
    #[serde(rename = "mdf-landing_page")]
    pub landing_page: String,

    #[serde(
        rename = "mdf-publication",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub publication: Vec<String>,

    #[serde(
        rename = "mdf-dataset_doi",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dataset_doi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_links: Option<DataLinks>,
}

impl RecordLinks {
    pub fn landing_page(url: impl Into<String>) -> Self {
        Self {
            landing_page: url.into(),
            publication: Vec::new(),
            dataset_doi: None,
            data_links: None,
        }
    }
}

// =============================================================================
// Dataset Metadata
// =============================================================================

/// Dataset-level metadata document
///
/// Fields not modelled here (for example `mdf-mrr`) are kept in `extra` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    #[serde(rename = "mdf-title")]
    pub title: String,

    #[serde(rename = "mdf-acl")]
    pub acl: Vec<String>,

    #[serde(rename = "mdf-source_name")]
    pub source_name: String,

    #[serde(rename = "mdf-citation")]
    pub citation: Vec<String>,

    #[serde(rename = "mdf-data_contact")]
    pub data_contact: Person,

    #[serde(rename = "mdf-author", default)]
    pub author: Vec<Person>,

    #[serde(
        rename = "mdf-license",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub license: Option<String>,

    #[serde(
        rename = "mdf-collection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub collection: Option<String>,

    #[serde(
        rename = "mdf-data_format",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub data_format: Vec<String>,

    #[serde(
        rename = "mdf-data_type",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub data_type: Vec<String>,

    #[serde(rename = "mdf-tags", default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(rename = "mdf-description")]
    pub description: String,

    #[serde(rename = "mdf-year")]
    pub year: i32,

    #[serde(rename = "mdf-links")]
    pub links: DatasetLinks,

    #[serde(
        rename = "mdf-data_contributor",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub data_contributor: Vec<Person>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatasetMetadata {
    /// Serialize into a JSON document
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| crate::Error::json("Failed to serialize dataset metadata", e))
    }

    /// Build from a JSON document that has already passed schema validation
    pub fn from_value(document: Value) -> Result<Self> {
        serde_json::from_value(document)
            .map_err(|e| crate::Error::json("Dataset metadata does not match its model", e))
    }
}

// =============================================================================
// Record Metadata
// =============================================================================

/// Record-level metadata document for one table row
///
/// Optional fields left as `None` are inherited from the dataset entry when the
/// record is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(rename = "mdf-title")]
    pub title: String,

    #[serde(rename = "mdf-acl")]
    pub acl: Vec<String>,

    #[serde(rename = "mdf-composition")]
    pub composition: String,

    /// JSON text of the source record
    #[serde(rename = "mdf-raw")]
    pub raw: String,

    #[serde(rename = "mdf-links")]
    pub links: RecordLinks,

    #[serde(rename = "mdf-tags", default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(
        rename = "mdf-description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        rename = "mdf-citation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub citation: Option<Vec<String>>,

    #[serde(
        rename = "mdf-data_contact",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub data_contact: Option<Person>,

    #[serde(
        rename = "mdf-author",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub author: Option<Vec<Person>>,

    #[serde(
        rename = "mdf-license",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub license: Option<String>,

    #[serde(
        rename = "mdf-collection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub collection: Option<String>,

    #[serde(rename = "mdf-year", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl RecordMetadata {
    /// Create record metadata with the required fields and nothing inherited yet
    pub fn new(
        title: impl Into<String>,
        acl: Vec<String>,
        composition: impl Into<String>,
        raw: impl Into<String>,
        links: RecordLinks,
    ) -> Self {
        Self {
            title: title.into(),
            acl,
            composition: composition.into(),
            raw: raw.into(),
            links,
            tags: None,
            description: None,
            citation: None,
            data_contact: None,
            author: None,
            license: None,
            collection: None,
            year: None,
        }
    }

    /// Serialize into a JSON document
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| crate::Error::json("Failed to serialize record metadata", e))
    }
}
