//! Destinations for validated feedstock documents
//!
//! A sink receives the dataset entry once, followed by accepted records in
//! submission order. Sinks never reorder, deduplicate, or rewrite entries.

use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{Error, Result};

/// Append-only destination for feedstock entries
pub trait FeedstockSink {
    /// Write the dataset entry; called once, before any record
    fn write_dataset(&mut self, entry: &Value) -> Result<()>;

    /// Append one record entry
    fn write_record(&mut self, entry: &Value) -> Result<()>;

    /// Number of record entries written so far (the dataset entry is not counted)
    fn record_count(&self) -> usize;

    /// Flush and release the destination
    fn finish(&mut self) -> Result<()>;
}

impl<S: FeedstockSink + ?Sized> FeedstockSink for &mut S {
    fn write_dataset(&mut self, entry: &Value) -> Result<()> {
        (**self).write_dataset(entry)
    }

    fn write_record(&mut self, entry: &Value) -> Result<()> {
        (**self).write_record(entry)
    }

    fn record_count(&self) -> usize {
        (**self).record_count()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: FeedstockSink + ?Sized> FeedstockSink for Box<S> {
    fn write_dataset(&mut self, entry: &Value) -> Result<()> {
        (**self).write_dataset(entry)
    }

    fn write_record(&mut self, entry: &Value) -> Result<()> {
        (**self).write_record(entry)
    }

    fn record_count(&self) -> usize {
        (**self).record_count()
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

// =============================================================================
// JSON Lines File Sink
// =============================================================================

/// Feedstock file holding one compact JSON document per line
///
/// The file is created (or truncated) on the first write, so a run that fails
/// before writing anything leaves an existing feedstock untouched. Every entry
/// is flushed as soon as it is written, so entries accepted before a fatal
/// error remain on disk.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    records: usize,
    closed: bool,
}

impl JsonLinesSink {
    /// Prepare a feedstock file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            return Err(Error::configuration("Feedstock output path is empty"));
        }

        Ok(Self {
            path,
            writer: None,
            records: 0,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&mut self) -> Result<&mut BufWriter<File>> {
        if self.closed {
            return Err(Error::SinkClosed);
        }

        if self.writer.is_none() {
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("Failed to create feedstock directory {}", parent.display()),
                        e,
                    )
                })?;
            }

            let file = File::create(&self.path).map_err(|e| {
                Error::io(
                    format!("Failed to create feedstock file {}", self.path.display()),
                    e,
                )
            })?;

            info!("Writing feedstock to {}", self.path.display());
            self.writer = Some(BufWriter::new(file));
        }

        self.writer.as_mut().ok_or(Error::SinkClosed)
    }

    fn append(&mut self, entry: &Value) -> Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| Error::json("Failed to encode feedstock entry", e))?;
        let path = self.path.clone();
        let writer = self.open()?;

        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| Error::io(format!("Failed to append to {}", path.display()), e))
    }
}

impl FeedstockSink for JsonLinesSink {
    fn write_dataset(&mut self, entry: &Value) -> Result<()> {
        self.append(entry)
    }

    fn write_record(&mut self, entry: &Value) -> Result<()> {
        self.append(entry)?;
        self.records += 1;
        Ok(())
    }

    fn record_count(&self) -> usize {
        self.records
    }

    fn finish(&mut self) -> Result<()> {
        self.closed = true;
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                Error::io(format!("Failed to flush {}", self.path.display()), e)
            })?;
            debug!(
                "Closed feedstock {} after {} records",
                self.path.display(),
                self.records
            );
        }
        Ok(())
    }
}

// =============================================================================
// In-Memory Sink
// =============================================================================

/// Sink that keeps entries in memory, for tests and dry runs
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub dataset: Option<Value>,
    pub records: Vec<Value>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FeedstockSink for MemorySink {
    fn write_dataset(&mut self, entry: &Value) -> Result<()> {
        if self.finished {
            return Err(Error::SinkClosed);
        }
        self.dataset = Some(entry.clone());
        Ok(())
    }

    fn write_record(&mut self, entry: &Value) -> Result<()> {
        if self.finished {
            return Err(Error::SinkClosed);
        }
        self.records.push(entry.clone());
        Ok(())
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
