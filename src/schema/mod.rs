//! Schema inference module
//!
//! # Overview
//!
//! Pass 1 of the pipeline. Streams every document (or up to a limit)
//! through the decoder and flattener, accumulating the union of dotted
//! column names, then drops names containing any excluded substring. The
//! resulting `ColumnSet` is frozen before the conversion pass begins: no
//! new columns may appear after it is built.

mod inference;
mod types;

pub use inference::SchemaInferrer;
pub use types::{ColumnSet, ColumnsReport};
