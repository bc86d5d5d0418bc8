//! Shared components for CLI commands
//!
//! This module contains the logging setup, configuration loading, and report
//! printing used by the command implementations.

use colored::*;
use tracing::{debug, info};

use crate::app::services::converter::{ConversionReport, MetadataSource};
use crate::cli::args::{ConvertArgs, OutputFormat};
use crate::config::Config;
use crate::constants::LOG_TARGET;
use crate::{Error, Result};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over `log_level`.
pub fn setup_logging(log_level: &str, compact: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if compact {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &ConvertArgs) -> Result<Config> {
    info!("Loading configuration");

    if let Some(path) = &args.config_file {
        info!("Using config file: {}", path.display());
    }

    let mut config = Config::load_layered(args.config_file.as_deref())?;
    apply_cli_overrides(&mut config, args);
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &ConvertArgs) {
    if let Some(input_path) = &args.input_path {
        config.input_path = input_path.clone();
    }
    if let Some(output_path) = &args.output_path {
        config.output_path = output_path.clone();
    }
    if let Some(composition_feedstock) = &args.composition_feedstock {
        config.composition_feedstock = composition_feedstock.clone();
    }
    if let Some(offset) = args.composition_offset {
        config.composition_offset = offset;
    }
    if let Some(separator) = &args.separator {
        config.separator = separator.clone();
    }
    if let Some(policy) = args.column_policy {
        config.column_policy = policy.into();
    }
    if let Some(metadata) = &args.metadata {
        config.metadata = Some(metadata.clone());
    }

    config.verbose = args.show_progress() && args.output_format == OutputFormat::Human;
}

/// Metadata source named by a CLI argument or config value
pub fn metadata_source(metadata: Option<&str>) -> MetadataSource {
    match metadata {
        Some(text) if !text.trim().is_empty() => MetadataSource::Json(text.to_string()),
        _ => MetadataSource::Default,
    }
}

/// Print the final report in the requested format
pub fn print_report(report: &ConversionReport, format: OutputFormat, dry_run: bool) -> Result<()> {
    match format {
        OutputFormat::Human => print_human_report(report, dry_run),
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(report)
                .map_err(|e| Error::json("Failed to encode conversion report", e))?;
            println!("{}", text);
        }
    }
    Ok(())
}

fn print_human_report(report: &ConversionReport, dry_run: bool) {
    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!("{}", "━".repeat(40));
    println!("   • Source: {}", report.source_name);
    println!("   • Input: {}", report.input_path.display());
    match (&report.output_path, dry_run) {
        (_, true) => println!("   • Output: {}", "dry run, nothing written".yellow()),
        (Some(path), false) => println!("   • Output: {}", path.display()),
        (None, false) => {}
    }
    println!(
        "   • Records parsed: {}",
        report.records_parsed.to_string().bright_white().bold()
    );
    println!(
        "   • Records accepted: {}",
        report.records_accepted.to_string().bright_green().bold()
    );

    if report.records_failed() > 0 {
        println!(
            "   • Records rejected: {}",
            report.records_rejected.to_string().bright_red().bold()
        );
        println!(
            "   • Unparseable lines: {}",
            report.parse_failures.to_string().bright_red().bold()
        );
    }

    println!("   • Success rate: {:.1}%", report.success_rate());
    println!(
        "   • Processing time: {:.2}s ({:.0} records/s)",
        report.elapsed.as_secs_f64(),
        report.throughput()
    );
    println!();
}
