//! NDJSON frame stream
//!
//! The first line is a header `{"width":W,"height":H}`; every following line
//! is one frame, a `height × width` array of cell short codes. Each line is
//! serialized into a reusable buffer and handed to the sink with a single
//! `write_all` followed by `flush`, so a reader tailing the file only ever
//! sees complete lines.

use super::error::SimulationError;
use crate::core_types::{Cell, Snapshot};
use serde::ser::{Serialize, Serializer};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// First line of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StreamHeader {
    pub width: usize,
    pub height: usize,
}

/// Rows of a snapshot serialized as nested arrays of codes
struct FrameRows<'a>(Snapshot<'a>);

struct RowCodes<'a>(&'a [Cell]);

impl Serialize for FrameRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.cells().chunks(self.0.width()).map(RowCodes))
    }
}

impl Serialize for RowCodes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(Cell::code))
    }
}

/// Append-only writer of the frame stream
#[derive(Debug)]
pub struct StreamWriter<W: Write> {
    sink: W,
    line: Vec<u8>,
    frames_written: u64,
}

impl StreamWriter<File> {
    /// Create (or truncate) the stream file, creating parent directories
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        debug!("Opened output stream {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Write> StreamWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            line: Vec::new(),
            frames_written: 0,
        }
    }

    /// Write the `{"width","height"}` header line
    pub fn write_header(&mut self, width: usize, height: usize) -> Result<(), SimulationError> {
        self.write_line(&StreamHeader { width, height })
    }

    /// Write one frame for the given snapshot
    pub fn write_frame(&mut self, snapshot: Snapshot<'_>) -> Result<(), SimulationError> {
        self.write_line(&FrameRows(snapshot))?;
        self.frames_written += 1;
        Ok(())
    }

    /// Frames written so far, header excluded
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<(), SimulationError> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, value)?;
        self.line.push(b'\n');
        self.sink.write_all(&self.line)?;
        self.sink.flush()?;
        Ok(())
    }
}
