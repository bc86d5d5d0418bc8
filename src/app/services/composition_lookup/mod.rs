//! Composition lookup service for record enrichment
//!
//! The gdb8-15 table carries no chemical formulas. Compositions come from the
//! precomputed feedstock of the sibling gdb9-14 dataset, addressed by the
//! record's integer index after skipping a fixed number of leading entries.
//! Lookups are read-only and an out-of-range index is always an error, never
//! a default value.

use crate::{Error, Result};

pub mod loader;
pub mod metadata;

#[cfg(test)]
pub mod tests;

pub use loader::FeedstockCompositions;
pub use metadata::LoadStats;

/// Read-only composition source keyed by record index
pub trait CompositionLookup {
    /// Composition of the molecule at `index`
    ///
    /// # Errors
    /// * `Error::CompositionIndex` if `index` lies outside the table
    /// * `Error::CompositionMissing` if the entry has no composition
    fn composition(&self, index: usize) -> Result<&str>;

    /// Number of addressable entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory composition table, indexed from zero
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionTable {
    entries: Vec<String>,
}

impl CompositionTable {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

impl<S: Into<String>> FromIterator<S> for CompositionTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl CompositionLookup for CompositionTable {
    fn composition(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| Error::composition_index(index, 0, self.entries.len()))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<L: CompositionLookup + ?Sized> CompositionLookup for &L {
    fn composition(&self, index: usize) -> Result<&str> {
        (**self).composition(index)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
