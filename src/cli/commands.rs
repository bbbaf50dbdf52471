//! CLI commands and argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::engine::DEFAULT_CHUNK_SIZE;
use crate::output::ParquetWriterConfig;

/// BSON dump to Parquet converter
#[derive(Parser, Debug)]
#[command(name = "bson2parquet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a BSON dump to a Parquet file
    Convert {
        /// Input dump file
        input: PathBuf,

        /// Output Parquet file
        output: PathBuf,

        /// Drop columns whose name contains this substring (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "SUBSTR")]
        exclude: Vec<String>,

        /// Force this column to 64-bit integers (repeatable)
        #[arg(short = 'i', long = "integer", value_name = "COLUMN")]
        integer: Vec<String>,

        /// Stop both passes after this many documents
        #[arg(short = 'l', long = "limit", value_name = "N")]
        limit: Option<u64>,

        /// Rows per flushed row-group
        #[arg(long, value_name = "N", default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Parquet compression codec
        #[arg(long, value_enum, default_value_t = CompressionArg::Snappy)]
        compression: CompressionArg,
    },

    /// Infer and print the column set without writing anything
    Columns {
        /// Input dump file
        input: PathBuf,

        /// Drop columns whose name contains this substring (repeatable)
        #[arg(short = 'x', long = "exclude", value_name = "SUBSTR")]
        exclude: Vec<String>,

        /// Stop after this many documents
        #[arg(short = 'l', long = "limit", value_name = "N")]
        limit: Option<u64>,

        /// Listing format
        #[arg(long, value_enum, default_value_t = ColumnsFormat::Text)]
        format: ColumnsFormat,
    },

    /// Pretty-print decoded documents from a dump
    Inspect {
        /// Input dump file
        input: PathBuf,

        /// Print every Nth document
        #[arg(
            short = 'e',
            long = "every",
            value_name = "N",
            default_value_t = 1,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        every: u64,

        /// Flatten nested documents before printing
        #[arg(short = 'f', long = "flatten")]
        flatten: bool,

        /// Wait for Enter after each printed document
        #[arg(short = 'w', long = "wait")]
        wait: bool,

        /// Stop after this many documents
        #[arg(short = 'l', long = "limit", value_name = "N")]
        limit: Option<u64>,
    },
}

/// Parquet compression codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompressionArg {
    /// No compression
    None,
    /// Snappy
    Snappy,
    /// Zstandard
    Zstd,
    /// Gzip
    Gzip,
}

impl CompressionArg {
    /// Writer configuration for this codec
    #[must_use]
    pub fn writer_config(self) -> ParquetWriterConfig {
        let config = ParquetWriterConfig::new();
        match self {
            Self::None => config.uncompressed(),
            Self::Snappy => config,
            Self::Zstd => config.zstd(),
            Self::Gzip => config.gzip(),
        }
    }
}

/// Column listing format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColumnsFormat {
    /// One column name per line
    Text,
    /// JSON report with count and names
    Json,
}
