//! Length-prefixed record reader
//!
//! # Overview
//!
//! The reader module pulls one binary document at a time from a byte
//! source. Each record starts with a 4-byte little-endian signed integer
//! giving the total record length, that prefix included. The reader owns
//! no buffer beyond the record in flight and never seeks.
//!
//! End-of-stream handling is exact: zero bytes at a record boundary is a
//! clean stop, one to three bytes is a truncated header, and a payload
//! shorter than its declared length is a truncated payload. Every error
//! carries the record index and byte offset where it happened.

use std::io::Read;

use crate::error::{Error, Result};

/// Smallest legal record: 4 length bytes plus a document terminator.
const MIN_RECORD_LEN: i32 = 5;

/// One length-prefixed binary record, exactly as it appeared on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Zero-based position of the record in the stream
    pub index: u64,
    /// Byte offset of the record's first length byte
    pub offset: u64,
    /// Full record bytes, length prefix included
    pub bytes: Vec<u8>,
}

impl RawRecord {
    /// Total record length in bytes, prefix included
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the record holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Streaming reader over length-prefixed records
pub struct RecordReader<R> {
    source: R,
    index: u64,
    offset: u64,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader over a byte source
    pub fn new(source: R) -> Self {
        Self {
            source,
            index: 0,
            offset: 0,
        }
    }

    /// Number of records returned so far
    pub fn records_read(&self) -> u64 {
        self.index
    }

    /// Byte offset at which the next record starts
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Pull the next record, or `None` at a clean end-of-stream
    pub fn next_record(&mut self) -> Result<Option<RawRecord>> {
        let mut header = [0u8; 4];
        let found = read_full(&mut self.source, &mut header)?;
        if found == 0 {
            return Ok(None);
        }
        if found < header.len() {
            return Err(Error::truncated_header(self.index, self.offset, found));
        }

        let declared = i32::from_le_bytes(header);
        if declared < MIN_RECORD_LEN {
            return Err(Error::invalid_length(self.index, self.offset, declared));
        }

        let total = declared as usize;
        let mut bytes = vec![0u8; total];
        bytes[..4].copy_from_slice(&header);
        let found = read_full(&mut self.source, &mut bytes[4..])?;
        if found < total - 4 {
            return Err(Error::truncated_payload(
                self.index,
                self.offset,
                total,
                4 + found,
            ));
        }

        let record = RawRecord {
            index: self.index,
            offset: self.offset,
            bytes,
        };
        self.index += 1;
        self.offset += total as u64;
        Ok(Some(record))
    }
}

/// Read until `buf` is full or the source ends, returning the count read.
///
/// `Read::read_exact` cannot be used here: the number of bytes present at
/// a short read decides whether the stream ended cleanly or mid-record.
fn read_full<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
