//! Engine types
//!
//! Options and statistics for the conversion pipeline.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::output::ParquetWriterConfig;

/// Rows per chunk when the caller does not choose one
pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Substrings that knock matching column names out of the schema
    pub exclude_substrings: Vec<String>,
    /// Columns forced to 64-bit integers
    pub int_columns: BTreeSet<String>,
    /// Document limit applied identically to both passes
    pub limit: Option<u64>,
    /// Rows per flushed chunk
    pub chunk_size: usize,
    /// Parquet writer tuning
    pub writer: ParquetWriterConfig,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            exclude_substrings: Vec::new(),
            int_columns: BTreeSet::new(),
            limit: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            writer: ParquetWriterConfig::default(),
        }
    }
}

impl ConvertOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set column-name exclusion substrings
    #[must_use]
    pub fn with_exclusions(mut self, substrings: Vec<String>) -> Self {
        self.exclude_substrings = substrings;
        self
    }

    /// Set the forced-integer columns
    #[must_use]
    pub fn with_int_columns(mut self, columns: impl IntoIterator<Item = String>) -> Self {
        self.int_columns = columns.into_iter().collect();
        self
    }

    /// Set the document limit for both passes
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Set rows per flushed chunk
    #[must_use]
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Set Parquet writer tuning
    #[must_use]
    pub fn with_writer_config(mut self, config: ParquetWriterConfig) -> Self {
        self.writer = config;
        self
    }
}

/// Statistics from a conversion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConvertStats {
    /// Documents visited by the inference pass
    pub documents_scanned: usize,
    /// Rows written by the conversion pass
    pub rows_written: usize,
    /// Columns in the final schema
    pub columns: usize,
    /// Row-groups flushed
    pub batches_flushed: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ConvertStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add documents visited during inference
    pub fn add_scanned(&mut self, count: usize) {
        self.documents_scanned += count;
    }

    /// Record the final schema width
    pub fn set_columns(&mut self, count: usize) {
        self.columns = count;
    }

    /// Record the writer's totals
    pub fn set_written(&mut self, rows: usize, batches: usize) {
        self.rows_written = rows;
        self.batches_flushed = batches;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
