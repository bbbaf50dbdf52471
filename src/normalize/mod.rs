//! Row normalization
//!
//! # Overview
//!
//! Pass 2 of the pipeline works row by row: project each flattened
//! document onto the frozen column set, render every value as text, pad
//! columns the document lacks with empty text, then coerce the designated
//! integer columns. The output row's key set always equals the column set,
//! so every row fits the fixed output schema.

use std::collections::{BTreeMap, BTreeSet};

use crate::decode::{DynamicValue, FieldMap};
use crate::schema::ColumnSet;

/// One output cell: text unless the column is forced to integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Int(i64),
}

impl CellValue {
    /// The text content, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Int(_) => None,
        }
    }

    /// The integer content, if this is an integer cell
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Text(_) => None,
        }
    }
}

/// One normalized output row, keyed by column name
pub type Row = BTreeMap<String, CellValue>;

/// Project a flattened document onto the column set.
///
/// Keys outside `columns` are dropped; values become their canonical text
/// form; names the document lacks are padded with empty text. Coercion of
/// `int_columns` runs last, padding included, so an integer column is
/// integer-typed in every row even when the document never carried it.
pub fn normalize(fields: &FieldMap, columns: &ColumnSet, int_columns: &BTreeSet<String>) -> Row {
    let mut row = Row::new();
    for name in columns.iter() {
        let text = fields
            .get(name)
            .map(DynamicValue::to_text)
            .unwrap_or_default();
        let cell = if int_columns.contains(name) {
            CellValue::Int(coerce_int(&text))
        } else {
            CellValue::Text(text)
        };
        row.insert(name.to_string(), cell);
    }
    row
}

/// Parse text as an integer, accepting a float spelling by truncating
/// toward zero; anything unparseable becomes 0.
pub fn coerce_int(text: &str) -> i64 {
    if let Ok(i) = text.parse::<i64>() {
        return i;
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => f as i64,
        _ => 0,
    }
}
