//! Append-only JSONL intent log.
//!
//! The first line is the stream header prefixed with `#`; every following
//! line is one [`IntentRecord`]. The injector process can tail this file (or
//! read it from stdout) and replay the intents against the OS.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use pinchpoint_common::error::{PinchpointError, PinchpointResult};
use pinchpoint_gesture_model::intent::{IntentRecord, IntentStreamHeader};

use crate::IntentSink;

/// Writes intent records as JSONL to any byte sink.
pub struct IntentWriter<W: Write> {
    writer: BufWriter<W>,
    records_written: u64,
}

impl IntentWriter<File> {
    /// Create (truncate) a file and write the header.
    pub fn create(path: &Path, header: &IntentStreamHeader) -> PinchpointResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Self::new(file, header)
    }
}

impl<W: Write> IntentWriter<W> {
    /// Wrap a writer and emit the header line.
    pub fn new(inner: W, header: &IntentStreamHeader) -> PinchpointResult<Self> {
        let mut writer = BufWriter::new(inner);

        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| PinchpointError::sink(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    /// Number of records written.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    fn flush_inner(&mut self) -> PinchpointResult<()> {
        self.writer
            .flush()
            .map_err(|e| PinchpointError::sink(format!("Failed to flush intents: {e}")))
    }
}

impl<W: Write + Send> IntentSink for IntentWriter<W> {
    fn emit(&mut self, record: &IntentRecord) -> PinchpointResult<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| PinchpointError::sink(format!("Failed to write intent: {e}")))?;
        self.records_written += 1;

        if self.records_written % 1000 == 0 {
            self.flush_inner()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> PinchpointResult<()> {
        self.flush_inner()
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

impl<W: Write> Drop for IntentWriter<W> {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
