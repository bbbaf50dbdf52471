//! Chunked Parquet writer
//!
//! Buffers normalized rows and writes them as one row-group per chunk
//! under a schema fixed at construction. The destination file is created
//! lazily on the first flush and finalized on every exit path: `finish()`
//! flushes the remaining partial chunk before closing, `abort()` closes
//! without flushing so already-written row-groups stay readable.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use tracing::{debug, warn};

use super::batch::{rows_to_batch, schema_for_columns};
use crate::error::{Error, Result, ResultExt};
use crate::normalize::Row;
use crate::schema::ColumnSet;

/// Configuration for Parquet writing
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
    dictionary_enabled: bool,
    statistics_enabled: bool,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024, // 1M rows
            dictionary_enabled: true,
            statistics_enabled: true,
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression algorithm
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the maximum row-group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Enable or disable dictionary encoding
    #[must_use]
    pub fn with_dictionary(mut self, enabled: bool) -> Self {
        self.dictionary_enabled = enabled;
        self
    }

    /// Enable or disable statistics
    #[must_use]
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.statistics_enabled = enabled;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    /// Use ZSTD compression
    #[must_use]
    pub fn zstd(mut self) -> Self {
        self.compression = Compression::ZSTD(parquet::basic::ZstdLevel::default());
        self
    }

    /// Use GZIP compression
    #[must_use]
    pub fn gzip(mut self) -> Self {
        self.compression = Compression::GZIP(parquet::basic::GzipLevel::default());
        self
    }

    /// Build writer properties
    fn build_properties(&self) -> WriterProperties {
        let mut builder = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size);

        if !self.dictionary_enabled {
            builder = builder.set_dictionary_enabled(false);
        }

        if !self.statistics_enabled {
            builder =
                builder.set_statistics_enabled(parquet::file::properties::EnabledStatistics::None);
        }

        builder.build()
    }
}

/// Totals reported by a finished writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterSummary {
    pub rows_written: usize,
    pub batches_flushed: usize,
}

/// Buffering writer that turns rows into one row-group per chunk
#[derive(Debug)]
pub struct ChunkedWriter {
    path: PathBuf,
    schema: SchemaRef,
    chunk_size: usize,
    config: ParquetWriterConfig,
    buffer: Vec<Row>,
    writer: Option<ArrowWriter<File>>,
    rows_written: usize,
    batches_flushed: usize,
}

impl ChunkedWriter {
    /// Create a writer for the given destination and column set.
    ///
    /// Nothing touches the filesystem until the first flush, so a run
    /// that never produces a row never produces a file.
    pub fn new(
        path: impl AsRef<Path>,
        columns: &ColumnSet,
        int_columns: &BTreeSet<String>,
        chunk_size: usize,
        config: ParquetWriterConfig,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::config("chunk size must be at least 1"));
        }
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            schema: schema_for_columns(columns, int_columns),
            chunk_size,
            // Row-groups are cut per chunk; keep the property in step so
            // the writer never splits a chunk on its own.
            config: config.with_row_group_size(chunk_size),
            buffer: Vec::new(),
            writer: None,
            rows_written: 0,
            batches_flushed: 0,
        })
    }

    /// The fixed output schema
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Rows flushed to the file so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Row-groups written so far
    pub fn batches_flushed(&self) -> usize {
        self.batches_flushed
    }

    /// Rows buffered but not yet flushed
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Buffer one row, flushing when the chunk fills
    pub fn push(&mut self, row: Row) -> Result<()> {
        self.buffer.push(row);
        if self.buffer.len() >= self.chunk_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Write the buffered rows as one row-group; a no-op on an empty buffer
    pub fn flush(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let batch = rows_to_batch(&self.schema, &self.buffer)?;
        if self.writer.is_none() {
            self.writer = Some(self.open_writer()?);
        }
        if let Some(writer) = self.writer.as_mut() {
            writer.write(&batch)?;
            writer.flush()?;
        }

        self.rows_written += batch.num_rows();
        self.batches_flushed += 1;
        debug!(
            batch = self.batches_flushed,
            rows = batch.num_rows(),
            total = self.rows_written,
            "flushed row-group"
        );
        self.buffer.clear();
        Ok(())
    }

    fn open_writer(&self) -> Result<ArrowWriter<File>> {
        let file = File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        let props = self.config.build_properties();
        Ok(ArrowWriter::try_new(
            file,
            Arc::clone(&self.schema),
            Some(props),
        )?)
    }

    /// Flush the remaining partial chunk and finalize the file
    pub fn finish(mut self) -> Result<WriterSummary> {
        self.flush()?;
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(WriterSummary {
            rows_written: self.rows_written,
            batches_flushed: self.batches_flushed,
        })
    }

    /// Close the file without flushing buffered rows.
    ///
    /// Row-groups already written stay readable behind a valid footer;
    /// whatever is still buffered is dropped. This is the failure path.
    pub fn abort(mut self) {
        self.buffer.clear();
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.close() {
                warn!(error = %e, "failed to finalize output file during abort");
            }
        }
    }
}
