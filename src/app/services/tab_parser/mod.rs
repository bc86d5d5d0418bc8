//! Tabular parser for whitespace-column text tables
//!
//! This module turns a blob of line-oriented, irregularly spaced text into a
//! lazy sequence of [`Record`](crate::app::models::Record)s, pairing each
//! line's fields positionally with a header list.
//!
//! ## Architecture
//!
//! - [`separator`] - Field separator policies (literal text or whitespace runs)
//! - [`parser`] - The restartable parser and its record iterator
//!
//! ## Usage
//!
//! ```rust
//! use mdf_feedstock::app::services::tab_parser::{Separator, TabularParser};
//!
//! let parser = TabularParser::new(
//!     "1      0.43295186     0.43295958",
//!     &["Index", "E1-CC2", "E2-CC2"],
//!     Separator::literal("     ").unwrap(),
//! );
//!
//! for record in parser.records() {
//!     let record = record.unwrap();
//!     assert_eq!(record.get("E1-CC2"), Some("0.43295186"));
//! }
//! ```

pub mod parser;
pub mod separator;

#[cfg(test)]
pub mod tests;

pub use parser::{ColumnPolicy, Records, TabularParser};
pub use separator::Separator;
