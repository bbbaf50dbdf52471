//! Output module
//!
//! Handles Arrow RecordBatch creation and Parquet file writing.
//!
//! # Overview
//!
//! This module provides:
//! - A fixed Arrow schema built from the inferred column set
//! - Batch construction from chunks of normalized rows
//! - A chunked Parquet writer producing one row-group per chunk

mod batch;
mod writer;

pub use batch::{rows_to_batch, schema_for_columns};
pub use writer::{ChunkedWriter, ParquetWriterConfig, WriterSummary};

#[cfg(test)]
mod tests;
