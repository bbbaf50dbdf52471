//! Column inference over a document stream

use std::io::Read;

use tracing::info;

use super::types::ColumnSet;
use crate::decode::decode_record;
use crate::error::Result;
use crate::flatten::flatten;
use crate::reader::RecordReader;

/// First-pass scanner that accumulates the union of flattened column names
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    exclude_substrings: Vec<String>,
    limit: Option<u64>,
}

impl SchemaInferrer {
    /// Create an inferrer with no exclusions and no limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop columns whose names contain any of these substrings
    #[must_use]
    pub fn with_exclusions(mut self, substrings: Vec<String>) -> Self {
        self.exclude_substrings = substrings;
        self
    }

    /// Stop scanning after this many documents
    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Scan the stream and return the final column set.
    ///
    /// Visits `min(N, limit)` documents. Memory cost is O(distinct
    /// columns); no per-document data is retained. Any framing or decode
    /// error aborts the pass with the record index and byte offset.
    pub fn infer<R: Read>(&self, reader: &mut RecordReader<R>) -> Result<ColumnSet> {
        let mut columns = ColumnSet::new();
        let mut scanned: u64 = 0;

        while self.limit.map_or(true, |limit| scanned < limit) {
            let record = match reader.next_record()? {
                Some(record) => record,
                None => break,
            };
            let fields = flatten(decode_record(&record)?);
            for key in fields.keys() {
                columns.insert(key.clone());
            }
            scanned += 1;
        }

        let removed = columns.exclude_containing(&self.exclude_substrings);
        info!(
            documents = scanned,
            columns = columns.len(),
            excluded = removed,
            "schema inference complete"
        );
        Ok(columns)
    }
}
