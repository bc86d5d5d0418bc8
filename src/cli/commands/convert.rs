//! Convert command implementation
//!
//! Runs the full gdb8-15 conversion: metadata resolution, table parsing,
//! composition enrichment, validation, and feedstock writing.

use tracing::info;

use super::shared::{load_configuration, metadata_source, print_report, setup_logging};
use crate::Result;
use crate::app::services::converter::{
    ConversionObserver, ConversionReport, Converter, ProgressObserver, TracingObserver,
};
use crate::app::services::feedstock_validator::MemorySink;
use crate::cli::args::ConvertArgs;

/// Run the convert command
pub fn run_convert(args: &ConvertArgs) -> Result<ConversionReport> {
    setup_logging(args.get_log_level(), args.quiet)?;

    let config = load_configuration(args)?;
    let metadata = metadata_source(config.metadata.as_deref());
    info!(
        "Converting {} into {}",
        config.data_file().display(),
        config.output_path.display()
    );

    let observer: Box<dyn ConversionObserver> = if config.verbose {
        Box::new(ProgressObserver::new())
    } else {
        Box::new(TracingObserver)
    };

    let converter = Converter::new(config);
    let report = if args.dry_run {
        info!("Dry run: feedstock entries are validated but not written");
        converter.run_into(metadata, MemorySink::new(), &observer)?
    } else {
        converter.run_observed(metadata, &observer)?
    };

    if !args.quiet {
        print_report(&report, args.output_format, args.dry_run)?;
    }

    Ok(report)
}
