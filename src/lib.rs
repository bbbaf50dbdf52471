// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # bson2parquet
//!
//! Two-pass converter from length-prefixed BSON dumps (the `mongodump`
//! wire layout) to Parquet tables.
//!
//! ## Features
//!
//! - **Schema Inference**: the column set is the union of flattened key
//!   paths across the whole dump
//! - **Nested-Key Flattening**: `{"a": {"b": 1}}` becomes column `a.b`
//! - **Column Filtering**: drop columns by name substring
//! - **Typed Columns**: every value is text unless the column is forced
//!   to 64-bit integers
//! - **Chunked Output**: one Parquet row-group per flushed chunk, bounded
//!   memory regardless of dump size
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bson2parquet::{ConvertOptions, Converter, Result};
//!
//! fn main() -> Result<()> {
//!     let options = ConvertOptions::new()
//!         .with_exclusions(vec!["secret".to_string()])
//!         .with_int_columns(["size".to_string()]);
//!
//!     let stats = Converter::new(options)
//!         .run("dump.bson".as_ref(), "dump.parquet".as_ref())?;
//!
//!     println!("{} rows across {} columns", stats.rows_written, stats.columns);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! pass 1 (schema)                      pass 2 (rows)
//! ┌────────┐ ┌────────┐ ┌─────────┐    ┌────────┐ ┌────────┐ ┌─────────┐
//! │ reader │→│ decode │→│ flatten │    │ reader │→│ decode │→│ flatten │
//! └────────┘ └────────┘ └────┬────┘    └────────┘ └────────┘ └────┬────┘
//!                            ↓                                    ↓
//!                      ┌───────────┐                       ┌───────────┐
//!                      │ ColumnSet │──────────────────────→│ normalize │
//!                      └───────────┘                       └─────┬─────┘
//!                                                                ↓
//!                                                         ┌─────────────┐
//!                                                         │ ChunkedWriter│
//!                                                         │  (Parquet)  │
//!                                                         └─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the converter
pub mod error;

/// Length-prefixed record framing
pub mod reader;

/// BSON decoding into dynamic values
pub mod decode;

/// Nested-key flattening
pub mod flatten;

/// Schema inference over a dump
pub mod schema;

/// Row normalization against a fixed column set
pub mod normalize;

/// Arrow batches and chunked Parquet output
pub mod output;

/// Two-pass conversion engine
pub mod engine;

/// Diagnostic document viewer
pub mod inspect;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

// Re-export commonly used types
pub use engine::{ConvertOptions, ConvertStats, Converter};
pub use output::{ChunkedWriter, ParquetWriterConfig, WriterSummary};
pub use schema::{ColumnSet, SchemaInferrer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
