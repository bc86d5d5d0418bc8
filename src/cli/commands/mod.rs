//! Command implementations for the feedstock converter CLI
//!
//! Each command is implemented in its own module:
//! - `convert`: spectra table to feedstock conversion
//! - `validate`: dataset metadata schema check

pub mod convert;
pub mod shared;
pub mod validate;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner
///
/// Dispatches to the subcommand handler. Returns `Ok(false)` when no
/// subcommand was given.
pub fn run(args: &Args) -> Result<bool> {
    match args.get_command() {
        Some(Commands::Convert(convert_args)) => {
            convert::run_convert(convert_args)?;
            Ok(true)
        }
        Some(Commands::ValidateMetadata(validate_args)) => {
            validate::run_validate_metadata(validate_args)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
