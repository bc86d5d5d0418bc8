//! Dataset metadata for the gdb8-15 feedstock
//!
//! The built-in document describes the published gdb8-15 dataset. Callers can
//! replace it with inline JSON, a JSON file, or an already parsed document
//! through [`MetadataSource`].

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::app::models::{DatasetLinks, DatasetMetadata, Person};
use crate::constants::{PUBLIC_ACL, SOURCE_NAME};
use crate::{Error, Result};

/// Built-in dataset metadata for the gdb8-15 electronic spectra
pub fn gdb8_15_dataset_metadata() -> DatasetMetadata {
    let lilienfeld = Person::new("O. Anatole", "von Lilienfeld")
        .with_email("anatole.vonlilienfeld@unibas.ch")
        .with_institution("Argonne National Laboratory");

    DatasetMetadata {
        title: "Electronic spectra from TDDFT and machine learning in chemical space".to_string(),
        acl: vec![PUBLIC_ACL.to_string()],
        source_name: SOURCE_NAME.to_string(),
        citation: vec![
            "Electronic spectra of 22k molecules Raghunathan Ramakrishnan, Mia Hartmann, \
             Enrico Tapavicza, O. Anatole von Lilienfeld, J. Chem. Phys. submitted (2015)"
                .to_string(),
            "Structures of 22k molecules Raghunathan Ramakrishnan, Pavlo Dral, Matthias Rupp, \
             O. Anatole von Lilienfeld Scientific Data 1, Article number: 140022 (2014). \
             doi:10.1038/sdata.2014.22"
                .to_string(),
        ],
        data_contact: lilienfeld.clone(),
        author: vec![
            lilienfeld,
            Person::new("Raghunathan", "Ramakrishnan").with_institution("University of Basel"),
            Person::new("Mia", "Hartmann").with_institution("California State University"),
            Person::new("Enrico", "Tapavicza")
                .with_email("Enrico.Tapavicza@csulb.edu")
                .with_institution("California State University"),
        ],
        license: None,
        collection: Some(SOURCE_NAME.to_string()),
        data_format: vec!["txt".to_string()],
        data_type: vec!["DFT".to_string()],
        tags: [
            "Density functional theory",
            "Excitation energies",
            "Computer modeling",
            "Oscillators",
            "Molecular spectra",
        ]
        .iter()
        .map(|tag| tag.to_string())
        .collect(),
        description: "Due to its favorable computational efficiency, time-dependent (TD) density \
             functional theory (DFT) enables the prediction of electronic spectra in a \
             high-throughput manner across chemical space. Its predictions, however, can be \
             quite inaccurate. We resolve this issue with machine learning models trained on \
             deviations of reference second-order approximate coupled-cluster (CC2) singles and \
             doubles spectra from TDDFT counterparts, or even from DFT gap. We applied this \
             approach to low-lying singlet-singlet vertical electronic spectra of over 20 000 \
             synthetically feasible small organic molecules with up to eight CONF atoms."
            .to_string(),
        year: 2015,
        links: DatasetLinks {
            landing_page: "http://qmml.org/datasets.html#gdb8-15".to_string(),
            publication: vec![
                "http://dx.doi.org/10.1063/1.4928757http://dx.doi.org/10.1063/1.4928757"
                    .to_string(),
            ],
            dataset_doi: Some("http://qmml.org/Datasets/gdb8-15.zip".to_string()),
            related_id: Vec::new(),
            data_links: None,
        },
        data_contributor: vec![
            Person::new("Evan", "Pike")
                .with_email("dep78@uchicago.edu")
                .with_institution("The University of Chicago")
                .with_github("dep78"),
        ],
        extra: Default::default(),
    }
}

/// Where the dataset metadata for a conversion comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MetadataSource {
    /// The built-in gdb8-15 document
    #[default]
    Default,
    /// Inline JSON text, or the path of a JSON file when the text does not parse
    Json(String),
    /// An already parsed document
    Document(Value),
}

impl MetadataSource {
    /// Classify a loosely typed metadata argument
    ///
    /// Null, an empty string, and an empty object select the built-in
    /// document. Numbers, booleans, and arrays are rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Default),
            Value::String(text) if text.trim().is_empty() => Ok(Self::Default),
            Value::String(text) => Ok(Self::Json(text)),
            Value::Object(map) if map.is_empty() => Ok(Self::Default),
            Value::Object(map) => Ok(Self::Document(Value::Object(map))),
            other => Err(Error::configuration(format!(
                "Invalid metadata parameter: expected a JSON object, JSON text, or file path, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Produce the dataset metadata document
    ///
    /// # Errors
    /// * `Error::MetadataUnreadable` if JSON text is neither valid JSON nor a
    ///   readable JSON file
    /// * `Error::Configuration` if the resolved document is not a JSON object
    pub fn resolve(self) -> Result<Value> {
        let document = match self {
            Self::Default => {
                debug!("Using built-in {} dataset metadata", SOURCE_NAME);
                return gdb8_15_dataset_metadata().to_value();
            }
            Self::Json(text) => match serde_json::from_str::<Value>(&text) {
                Ok(document) => {
                    debug!("Parsed inline dataset metadata");
                    document
                }
                Err(inline_error) => read_metadata_file(Path::new(text.trim()), &inline_error)?,
            },
            Self::Document(document) => document,
        };

        if !document.is_object() {
            return Err(Error::configuration(format!(
                "Invalid metadata parameter: dataset metadata must be a JSON object, got {}",
                json_type_name(&document)
            )));
        }

        Ok(document)
    }
}

fn read_metadata_file(path: &Path, inline_error: &serde_json::Error) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::metadata_unreadable(format!(
            "not inline JSON ({}) and not a readable file {}: {}",
            inline_error,
            path.display(),
            e
        ))
    })?;

    let document = serde_json::from_str(&content).map_err(|e| {
        Error::metadata_unreadable(format!("{} is not valid JSON: {}", path.display(), e))
    })?;

    debug!("Read dataset metadata from {}", path.display());
    Ok(document)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
