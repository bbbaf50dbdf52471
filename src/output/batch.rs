//! Arrow schema and batch construction from normalized rows

use std::collections::BTreeSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};
use crate::normalize::{CellValue, Row};
use crate::schema::ColumnSet;

/// Build the fixed output schema: columns in lexicographic name order,
/// `Utf8` unless the column is forced to integer
pub fn schema_for_columns(columns: &ColumnSet, int_columns: &BTreeSet<String>) -> SchemaRef {
    let fields: Vec<Field> = columns
        .iter()
        .map(|name| {
            let data_type = if int_columns.contains(name) {
                DataType::Int64
            } else {
                DataType::Utf8
            };
            Field::new(name, data_type, true)
        })
        .collect();
    Arc::new(Schema::new(fields))
}

/// Build one `RecordBatch` from a chunk of rows under the fixed schema.
///
/// Every row must carry exactly the schema's columns with the matching
/// cell type; anything else fails as a schema mismatch before a single
/// byte is written.
pub fn rows_to_batch(schema: &SchemaRef, rows: &[Row]) -> Result<RecordBatch> {
    for (row_index, row) in rows.iter().enumerate() {
        if row.len() != schema.fields().len() {
            return Err(Error::schema_mismatch(format!(
                "row {row_index} has {} columns where the schema has {}",
                row.len(),
                schema.fields().len()
            )));
        }
    }

    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        arrays.push(build_column(field.name(), field.data_type(), rows)?);
    }

    RecordBatch::try_new(Arc::clone(schema), arrays).map_err(Error::from)
}

/// Build one column array across the chunk's rows
fn build_column(name: &str, data_type: &DataType, rows: &[Row]) -> Result<ArrayRef> {
    match data_type {
        DataType::Int64 => {
            let mut values = Vec::with_capacity(rows.len());
            for (row_index, row) in rows.iter().enumerate() {
                match row.get(name) {
                    Some(CellValue::Int(i)) => values.push(*i),
                    Some(CellValue::Text(_)) => {
                        return Err(Error::schema_mismatch(format!(
                            "row {row_index} holds text in integer column '{name}'"
                        )))
                    }
                    None => {
                        return Err(Error::schema_mismatch(format!(
                            "row {row_index} is missing column '{name}'"
                        )))
                    }
                }
            }
            Ok(Arc::new(Int64Array::from(values)))
        }
        _ => {
            let mut values = Vec::with_capacity(rows.len());
            for (row_index, row) in rows.iter().enumerate() {
                match row.get(name) {
                    Some(CellValue::Text(s)) => values.push(s.clone()),
                    Some(CellValue::Int(_)) => {
                        return Err(Error::schema_mismatch(format!(
                            "row {row_index} holds an integer in text column '{name}'"
                        )))
                    }
                    None => {
                        return Err(Error::schema_mismatch(format!(
                            "row {row_index} is missing column '{name}'"
                        )))
                    }
                }
            }
            Ok(Arc::new(StringArray::from(values)))
        }
    }
}
