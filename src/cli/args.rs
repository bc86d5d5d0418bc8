//! Command-line argument definitions for the feedstock converter
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::app::services::tab_parser::{ColumnPolicy, Separator};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the gdb8-15 feedstock converter
///
/// Converts the gdb8-15 electronic spectra table into a validated Materials
/// Data Facility feedstock.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mdf-feedstock",
    version,
    about = "Convert the gdb8-15 electronic spectra dataset into MDF feedstock",
    long_about = "Parses the gdb8-15 electronic spectra table (TDDFT and CC2 excitation energies \
                  for ~22,000 molecules), enriches every record with its composition from the \
                  gdb9-14 feedstock, validates dataset and record metadata against the MDF \
                  schemas, and writes the accepted records as newline-delimited JSON."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert the spectra table into a feedstock (main command)
    Convert(ConvertArgs),
    /// Check a dataset metadata document against the dataset schema
    ValidateMetadata(ValidateMetadataArgs),
}

/// Arguments for the convert command
#[derive(Debug, Clone, Parser)]
pub struct ConvertArgs {
    /// Dataset directory or spectra file
    ///
    /// A directory must contain gdb8_22k_elec_spec.txt. Defaults to
    /// ./datasets/gdb8-15
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Dataset directory or spectra file"
    )]
    pub input_path: Option<PathBuf>,

    /// Feedstock file to write
    ///
    /// Parent directories are created as needed. An existing file is replaced
    /// once the dataset metadata has been validated. Defaults to
    /// ./feedstock/gdb8-15_all.json
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Feedstock file to write"
    )]
    pub output_path: Option<PathBuf>,

    /// gdb9-14 feedstock supplying compositions
    #[arg(
        long = "composition-feedstock",
        value_name = "FILE",
        help = "gdb9-14 feedstock supplying compositions"
    )]
    pub composition_feedstock: Option<PathBuf>,

    /// Leading composition feedstock documents to skip
    #[arg(
        long = "composition-offset",
        value_name = "COUNT",
        help = "Leading composition feedstock documents to skip (default 6095)"
    )]
    pub composition_offset: Option<usize>,

    /// Dataset metadata as inline JSON or a JSON file path
    ///
    /// The built-in gdb8-15 metadata is used when not specified.
    #[arg(
        short = 'm',
        long = "metadata",
        value_name = "JSON|FILE",
        help = "Dataset metadata as inline JSON or a JSON file path"
    )]
    pub metadata: Option<String>,

    /// Column separator policy
    ///
    /// `whitespace` splits on any run of whitespace, `spaces:N` on exactly N
    /// spaces, `tab` on tabs; any other text is used literally.
    #[arg(
        long = "separator",
        value_name = "POLICY",
        help = "Column separator: whitespace, tab, spaces:N, or literal text (default spaces:5)"
    )]
    pub separator: Option<Separator>,

    /// Handling of lines with an unexpected number of fields
    #[arg(
        long = "column-policy",
        value_enum,
        value_name = "POLICY",
        help = "Handling of lines with an unexpected number of fields"
    )]
    pub column_policy: Option<ColumnPolicyArg>,

    /// Validate everything without writing a feedstock
    #[arg(
        long = "dry-run",
        help = "Validate every record without writing the feedstock"
    )]
    pub dry_run: bool,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// ~/.config/mdf-feedstock/config.toml
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Nothing is written to stdout; only errors are logged.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the final report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the final report"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the validate-metadata command
#[derive(Debug, Clone, Parser)]
pub struct ValidateMetadataArgs {
    /// Dataset metadata as inline JSON or a JSON file path
    ///
    /// The built-in gdb8-15 metadata is checked when not specified.
    #[arg(value_name = "JSON|FILE")]
    pub metadata: Option<String>,

    /// Print the validated document
    #[arg(long = "show", help = "Print the validated document as JSON")]
    pub show: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Column policy as a CLI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColumnPolicyArg {
    /// Reject lines with the wrong number of fields
    Strict,
    /// Pad short lines with empty fields and drop surplus ones
    Lenient,
}

impl From<ColumnPolicyArg> for ColumnPolicy {
    fn from(arg: ColumnPolicyArg) -> Self {
        match arg {
            ColumnPolicyArg::Strict => ColumnPolicy::Strict,
            ColumnPolicyArg::Lenient => ColumnPolicy::Lenient,
        }
    }
}

/// Output format options for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// The requested command, if any
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl ConvertArgs {
    /// Get the appropriate log level based on verbosity settings
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            log_level_for(self.verbose)
        }
    }

    /// Whether to narrate the run on stdout
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ValidateMetadataArgs {
    pub fn get_log_level(&self) -> &'static str {
        log_level_for(self.verbose)
    }
}

fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
