//! gdb8-15 to MDF feedstock conversion
//!
//! This module ties the tabular parser, the composition lookup, and the
//! feedstock validator together into one run over the spectra table.
//!
//! ## Pipeline
//!
//! 1. Resolve the dataset metadata ([`MetadataSource`])
//! 2. Validate it and open the feedstock ([`Validator`](crate::Validator))
//! 3. Cut the table out of the raw file and trim its lines ([`preprocess`])
//! 4. Parse each line, look up its composition by index, assemble the record
//!    metadata ([`record`]) and submit it
//! 5. Finish the feedstock and report ([`ConversionReport`])
//!
//! Progress is reported through a [`ConversionObserver`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mdf_feedstock::{MetadataSource, convert};
//!
//! # fn example() -> mdf_feedstock::Result<()> {
//! let report = convert("datasets/gdb8-15", MetadataSource::Default, false)?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

pub mod metadata;
pub mod observer;
pub mod pipeline;
pub mod preprocess;
pub mod record;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use metadata::{MetadataSource, gdb8_15_dataset_metadata};
pub use observer::{ConversionObserver, ProgressObserver, SilentObserver, TracingObserver};
pub use pipeline::{Converter, convert, process_records};
pub use preprocess::{PreparedTable, prepare_table};
pub use stats::ConversionReport;
