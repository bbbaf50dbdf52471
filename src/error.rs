//! Error types for bson2parquet
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for bson2parquet
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Record Framing Errors
    // ============================================================================
    #[error("truncated record header at record {index} (byte offset {offset}): expected 4 length bytes, found {found}")]
    TruncatedHeader { index: u64, offset: u64, found: usize },

    #[error("truncated record payload at record {index} (byte offset {offset}): declared {declared} bytes, found {found}")]
    TruncatedPayload {
        index: u64,
        offset: u64,
        declared: usize,
        found: usize,
    },

    #[error("invalid record length at record {index} (byte offset {offset}): declared {declared} bytes, minimum is 5")]
    InvalidLength { index: u64, offset: u64, declared: i32 },

    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error("failed to decode document at record {index} (byte offset {offset}): {message}")]
    Decode {
        index: u64,
        offset: u64,
        message: String,
    },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // I/O and Serialization Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    JsonRender(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a truncated-header error
    pub fn truncated_header(index: u64, offset: u64, found: usize) -> Self {
        Self::TruncatedHeader {
            index,
            offset,
            found,
        }
    }

    /// Create a truncated-payload error
    pub fn truncated_payload(index: u64, offset: u64, declared: usize, found: usize) -> Self {
        Self::TruncatedPayload {
            index,
            offset,
            declared,
            found,
        }
    }

    /// Create an invalid-length error
    pub fn invalid_length(index: u64, offset: u64, declared: i32) -> Self {
        Self::InvalidLength {
            index,
            offset,
            declared,
        }
    }

    /// Create a decode error
    pub fn decode(index: u64, offset: u64, message: impl Into<String>) -> Self {
        Self::Decode {
            index,
            offset,
            message: message.into(),
        }
    }

    /// Create a schema-mismatch error
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True for errors caused by the input ending mid-record
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Error::TruncatedHeader { .. } | Error::TruncatedPayload { .. }
        )
    }
}

/// Result type alias for bson2parquet
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
