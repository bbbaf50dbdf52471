//! CLI module
//!
//! Command-line interface for the converter.
//!
//! # Commands
//!
//! - `convert` - Two-pass conversion of a dump to a Parquet file
//! - `columns` - Infer and print the column set
//! - `inspect` - Pretty-print decoded documents

mod commands;
mod runner;

pub use commands::{Cli, ColumnsFormat, Commands, CompressionArg};
pub use runner::Runner;
