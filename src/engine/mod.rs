//! Execution engine module
//!
//! Two-pass orchestration of the conversion pipeline.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Converter` - Runs schema inference and then the conversion pass
//! - `ConvertOptions` - Configuration for a conversion run
//! - `ConvertStats` - Counters reported when a run finishes

mod types;

pub use types::{ConvertOptions, ConvertStats, DEFAULT_CHUNK_SIZE};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::decode::decode_record;
use crate::error::{Result, ResultExt};
use crate::flatten::flatten;
use crate::normalize::normalize;
use crate::output::{ChunkedWriter, WriterSummary};
use crate::reader::RecordReader;
use crate::schema::{ColumnSet, SchemaInferrer};

/// Two-pass converter from a document dump to a Parquet file
pub struct Converter {
    /// Run configuration
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Run both passes over `input` and write the table to `output`.
    ///
    /// The first pass freezes the column set, the second streams rows
    /// through a [`ChunkedWriter`]. If no columns survive inference the
    /// run ends without creating an output file. On a mid-pass failure
    /// the writer is aborted so already flushed row-groups stay readable,
    /// and a failure before the first flush leaves no file behind.
    pub fn run(&self, input: &Path, output: &Path) -> Result<ConvertStats> {
        let start = Instant::now();
        let mut stats = ConvertStats::new();

        info!(input = %input.display(), "starting schema inference pass");
        let columns = self.infer_columns(input, &mut stats)?;
        stats.set_columns(columns.len());

        if columns.is_empty() {
            warn!("no columns survived inference, skipping output");
            self.finish_stats(&mut stats, start);
            return Ok(stats);
        }

        info!(
            columns = columns.len(),
            output = %output.display(),
            "starting conversion pass"
        );
        let writer = ChunkedWriter::new(
            output,
            &columns,
            &self.options.int_columns,
            self.options.chunk_size,
            self.options.writer.clone(),
        )?;
        let summary = self.convert(input, &columns, writer)?;
        stats.set_written(summary.rows_written, summary.batches_flushed);
        self.finish_stats(&mut stats, start);

        info!(
            rows = stats.rows_written,
            batches = stats.batches_flushed,
            duration_ms = stats.duration_ms,
            "conversion complete"
        );
        Ok(stats)
    }

    /// First pass: scan the dump and freeze the column set
    fn infer_columns(&self, input: &Path, stats: &mut ConvertStats) -> Result<ColumnSet> {
        let mut reader = self.open_input(input)?;
        let inferrer = SchemaInferrer::new()
            .with_exclusions(self.options.exclude_substrings.clone())
            .with_limit(self.options.limit);
        let columns = inferrer.infer(&mut reader)?;
        #[allow(clippy::cast_possible_truncation)]
        stats.add_scanned(reader.records_read() as usize);
        Ok(columns)
    }

    /// Second pass: re-read the dump and stream rows through the writer
    fn convert(
        &self,
        input: &Path,
        columns: &ColumnSet,
        mut writer: ChunkedWriter,
    ) -> Result<WriterSummary> {
        let mut reader = self.open_input(input)?;
        match self.convert_rows(&mut reader, columns, &mut writer) {
            Ok(()) => writer.finish(),
            Err(e) => {
                writer.abort();
                Err(e)
            }
        }
    }

    /// Decode, flatten, and normalize records until EOF or the limit
    fn convert_rows<R: Read>(
        &self,
        reader: &mut RecordReader<R>,
        columns: &ColumnSet,
        writer: &mut ChunkedWriter,
    ) -> Result<()> {
        let mut converted: u64 = 0;
        while self.options.limit.map_or(true, |limit| converted < limit) {
            let record = match reader.next_record()? {
                Some(record) => record,
                None => break,
            };
            let fields = flatten(decode_record(&record)?);
            let row = normalize(&fields, columns, &self.options.int_columns);
            writer.push(row)?;
            converted += 1;
        }
        Ok(())
    }

    fn open_input(&self, input: &Path) -> Result<RecordReader<BufReader<File>>> {
        let file =
            File::open(input).with_context(|| format!("failed to open {}", input.display()))?;
        Ok(RecordReader::new(BufReader::new(file)))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn finish_stats(&self, stats: &mut ConvertStats, start: Instant) {
        stats.set_duration(start.elapsed().as_millis() as u64);
    }
}

#[cfg(test)]
mod tests;
