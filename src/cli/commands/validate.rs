//! Validate-metadata command implementation
//!
//! Checks a dataset metadata document against the dataset schema without
//! reading any data files.

use colored::*;
use tracing::info;

use super::shared::{metadata_source, setup_logging};
use crate::app::services::feedstock_validator::schema;
use crate::cli::args::ValidateMetadataArgs;
use crate::{Error, Result};

/// Run the validate-metadata command
///
/// Returns `Error::Schema` listing every violation when the document is invalid.
pub fn run_validate_metadata(args: &ValidateMetadataArgs) -> Result<()> {
    setup_logging(args.get_log_level(), false)?;

    let document = metadata_source(args.metadata.as_deref()).resolve()?;
    let violations = schema::dataset_violations(&document)?;

    if !violations.is_empty() {
        println!("{}", "Dataset metadata is invalid".bright_red().bold());
        for violation in &violations {
            println!("   • {}", violation);
        }
        return Err(Error::schema("dataset metadata", violations));
    }

    let source_name = document
        .get("mdf-source_name")
        .and_then(|value| value.as_str())
        .unwrap_or("unknown");
    info!("Dataset metadata for '{}' is valid", source_name);
    println!(
        "{} {}",
        "✓".bright_green().bold(),
        format!("Dataset metadata for '{}' is valid", source_name).bright_green()
    );

    if args.show {
        let text = serde_json::to_string_pretty(&document)
            .map_err(|e| Error::json("Failed to encode dataset metadata", e))?;
        println!("{}", text);
    }

    Ok(())
}
