//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! command line overrides. The result is validated once before a run.
//!
//! ```toml
//! input_path = "datasets/gdb8-15"
//! composition_feedstock = "feedstock/gdb9-14_all.json"
//! output_path = "feedstock/gdb8-15_all.json"
//! composition_offset = 6095
//! separator = "spaces:5"
//! column_policy = "strict"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::services::tab_parser::{ColumnPolicy, Separator};
use crate::constants::{
    APP_NAME, COMPOSITION_FEEDSTOCK_FILE, COMPOSITION_OFFSET, CONFIG_FILE_NAME, DATA_FILE_NAME,
    FEEDSTOCK_DIR, FIRST_DATA_ROW_MARKER, OUTPUT_FEEDSTOCK_FILE, SOURCE_NAME,
};
use crate::{Error, Result};

/// Settings for one gdb8-15 conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset directory, or the spectra file itself
    pub input_path: PathBuf,

    /// gdb9-14 feedstock supplying compositions
    pub composition_feedstock: PathBuf,

    /// Feedstock file to write
    pub output_path: PathBuf,

    /// Leading composition feedstock documents to skip
    pub composition_offset: usize,

    /// Column separator policy for the spectra table
    pub separator: Separator,

    /// Handling of lines whose field count differs from the header count
    pub column_policy: ColumnPolicy,

    /// Literal text of the first data row
    pub first_row_marker: String,

    /// Dataset metadata as inline JSON or a JSON file path; built-in when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,

    /// Narrate the run on stdout
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        let feedstock_dir = PathBuf::from(FEEDSTOCK_DIR);
        Self {
            input_path: PathBuf::from("datasets").join(SOURCE_NAME),
            composition_feedstock: feedstock_dir.join(COMPOSITION_FEEDSTOCK_FILE),
            output_path: feedstock_dir.join(OUTPUT_FEEDSTOCK_FILE),
            composition_offset: COMPOSITION_OFFSET,
            separator: Separator::default(),
            column_policy: ColumnPolicy::default(),
            first_row_marker: FIRST_DATA_ROW_MARKER.to_string(),
            metadata: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Default config file location (`~/.config/mdf-feedstock/config.toml` on Linux)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine config directory"))
    }

    /// Load settings from a TOML file; keys left out keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults overlaid by `config_file`, or by the default config file if it exists
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        match config_file {
            Some(path) => Self::from_file(path),
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::configuration(format!("Failed to encode configuration: {}", e)))
    }

    /// The spectra file to read
    ///
    /// A directory input resolves to the data file inside it.
    pub fn data_file(&self) -> PathBuf {
        if self.input_path.is_dir() {
            self.input_path.join(DATA_FILE_NAME)
        } else {
            self.input_path.clone()
        }
    }

    /// Check settings that would otherwise fail mid-run
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(Error::configuration("Input path is empty"));
        }
        if self.composition_feedstock.as_os_str().is_empty() {
            return Err(Error::configuration("Composition feedstock path is empty"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::configuration("Output path is empty"));
        }
        if self.first_row_marker.trim().is_empty() {
            return Err(Error::configuration("First data row marker is empty"));
        }
        if self.output_path == self.composition_feedstock {
            return Err(Error::configuration(format!(
                "Output path {} would overwrite the composition feedstock",
                self.output_path.display()
            )));
        }
        if self.output_path == self.data_file() {
            return Err(Error::configuration(format!(
                "Output path {} would overwrite the input table",
                self.output_path.display()
            )));
        }
        Ok(())
    }
}
