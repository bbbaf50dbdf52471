//! Diagnostic document viewer
//!
//! Streams the same length-prefixed dumps the converter reads and
//! pretty-prints every Nth decoded document, optionally flattened and
//! optionally pausing between documents.
//!
//! # Overview
//!
//! The inspect module provides:
//! - `Inspector` - Streams a dump and prints selected documents
//! - `InspectOptions` - Viewer configuration
//! - `Confirmation` - Injected pause hook between printed documents

use std::io::{self, Read, Write};

use serde::Serialize;
use tracing::info;

use crate::decode::{decode_record, fields_to_json};
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::reader::RecordReader;

/// Pause hook invoked after each printed document
pub trait Confirmation {
    /// Block until the user allows the next document
    fn confirm(&mut self) -> Result<()>;
}

/// No-op confirmation for non-interactive runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPause;

impl Confirmation for NoPause {
    fn confirm(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Stdin-backed confirmation that waits for Enter
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPause;

impl Confirmation for StdinPause {
    fn confirm(&mut self) -> Result<()> {
        // Prompt on stderr so piped stdout stays clean JSON.
        eprint!("Press Enter to continue...");
        io::stderr().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(())
    }
}

/// Configuration for the viewer
#[derive(Debug, Clone)]
pub struct InspectOptions {
    /// Print every Nth document (1 prints all)
    pub every: u64,
    /// Flatten nested documents before printing
    pub flatten: bool,
    /// Pause for confirmation after each printed document
    pub wait: bool,
    /// Stop after this many documents
    pub limit: Option<u64>,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            every: 1,
            flatten: false,
            wait: false,
            limit: None,
        }
    }
}

impl InspectOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Print every Nth document
    #[must_use]
    pub fn with_every(mut self, every: u64) -> Self {
        self.every = every;
        self
    }

    /// Flatten nested documents before printing
    #[must_use]
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Pause after each printed document
    #[must_use]
    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    /// Stop after this many documents
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }
}

/// Counters from a viewer run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InspectStats {
    /// Documents read from the stream
    pub documents_scanned: usize,
    /// Documents actually printed
    pub documents_printed: usize,
}

/// Streams a dump and pretty-prints selected documents
pub struct Inspector {
    /// Viewer configuration
    options: InspectOptions,
}

impl Inspector {
    /// Create an inspector with the given options
    pub fn new(options: InspectOptions) -> Self {
        Self { options }
    }

    /// Print every Nth decoded document from `reader` to `out`.
    ///
    /// Document `i` (zero-based) prints whenever `i % every == 0`, as a
    /// header line with the record index and byte offset followed by the
    /// document as pretty JSON. `pause` runs after each printed document
    /// when `wait` is set; interactive callers pass [`StdinPause`],
    /// everything else passes [`NoPause`].
    pub fn run<R, W, C>(
        &self,
        reader: &mut RecordReader<R>,
        out: &mut W,
        pause: &mut C,
    ) -> Result<InspectStats>
    where
        R: Read,
        W: Write,
        C: Confirmation,
    {
        if self.options.every == 0 {
            return Err(Error::config("every must be at least 1"));
        }
        let mut stats = InspectStats::default();
        while self
            .options
            .limit
            .map_or(true, |limit| (stats.documents_scanned as u64) < limit)
        {
            let record = match reader.next_record()? {
                Some(record) => record,
                None => break,
            };
            stats.documents_scanned += 1;
            if record.index % self.options.every != 0 {
                continue;
            }
            let mut fields = decode_record(&record)?;
            if self.options.flatten {
                fields = flatten(fields);
            }
            writeln!(
                out,
                "--- document {} (offset {}) ---",
                record.index, record.offset
            )?;
            writeln!(out, "{}", serde_json::to_string_pretty(&fields_to_json(&fields))?)?;
            stats.documents_printed += 1;
            if self.options.wait {
                pause.confirm()?;
            }
        }
        info!(
            scanned = stats.documents_scanned,
            printed = stats.documents_printed,
            "inspection complete"
        );
        Ok(stats)
    }
}
