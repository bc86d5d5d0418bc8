//! Schema-validating feedstock writer
//!
//! This module gate-keeps dataset-level and record-level metadata before it
//! becomes part of a feedstock. A [`Validator`] is bound to exactly one
//! dataset: it validates the dataset document once at construction, then
//! accepts or rejects record documents one at a time.
//!
//! ## Architecture
//!
//! - [`schema`] - Embedded JSON schemas and violation collection
//! - [`validator`] - The validator itself and submission outcomes
//! - [`sink`] - Where accepted documents go (JSON-lines file or memory)
//!
//! ## Failure tiers
//!
//! Dataset validation failure is fatal and surfaces as
//! [`Error::Schema`](crate::Error::Schema) from [`Validator::new`]. Record
//! validation failure only rejects that record; see [`SubmitOutcome`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mdf_feedstock::app::services::converter::metadata::gdb8_15_dataset_metadata;
//! use mdf_feedstock::app::services::feedstock_validator::{JsonLinesSink, Validator};
//!
//! # fn example() -> mdf_feedstock::Result<()> {
//! let sink = JsonLinesSink::create("feedstock/gdb8-15_all.json")?;
//! let mut validator = Validator::from_metadata(&gdb8_15_dataset_metadata(), sink)?;
//!
//! let outcome = validator.submit_value(serde_json::json!({"mdf-title": "incomplete"}))?;
//! assert!(!outcome.success());
//!
//! let summary = validator.finish()?;
//! println!("{} records written", summary.records_accepted);
//! # Ok(())
//! # }
//! ```

pub mod schema;
pub mod sink;
pub mod validator;

#[cfg(test)]
pub mod tests;

pub use sink::{FeedstockSink, JsonLinesSink, MemorySink};
pub use validator::{SubmitOutcome, Validator, WriteSummary};
