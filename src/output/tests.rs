//! Tests for output module

use super::*;
use crate::normalize::{CellValue, Row};
use crate::schema::ColumnSet;
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;

fn columns(names: &[&str]) -> ColumnSet {
    names.iter().copied().collect()
}

fn ints(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn text_row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), CellValue::Text((*value).to_string())))
        .collect()
}

fn read_row_group_sizes(path: &Path) -> Vec<i64> {
    let reader = SerializedFileReader::new(File::open(path).unwrap()).unwrap();
    let metadata = reader.metadata();
    (0..metadata.num_row_groups())
        .map(|i| metadata.row_group(i).num_rows())
        .collect()
}

// ============================================================================
// Schema Construction
// ============================================================================

#[test]
fn test_schema_is_lexicographic_and_typed() {
    let schema = schema_for_columns(&columns(&["b.c", "a", "size"]), &ints(&["size"]));

    let names: Vec<&str> = schema
        .fields()
        .iter()
        .map(|field| field.name().as_str())
        .collect();
    assert_eq!(names, vec!["a", "b.c", "size"]);

    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(1).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(2).data_type(), &DataType::Int64);
}

// ============================================================================
// Batch Construction
// ============================================================================

#[test]
fn test_rows_to_batch_builds_columns() {
    let schema = schema_for_columns(&columns(&["count", "name"]), &ints(&["count"]));
    let rows = vec![
        Row::from([
            ("count".to_string(), CellValue::Int(1)),
            ("name".to_string(), CellValue::Text("first".to_string())),
        ]),
        Row::from([
            ("count".to_string(), CellValue::Int(2)),
            ("name".to_string(), CellValue::Text("second".to_string())),
        ]),
    ];

    let batch = rows_to_batch(&schema, &rows).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 2);

    let count = batch
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(count.value(0), 1);
    assert_eq!(count.value(1), 2);

    let name = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(name.value(0), "first");
    assert_eq!(name.value(1), "second");
}

#[test]
fn test_rows_to_batch_rejects_missing_column() {
    let schema = schema_for_columns(&columns(&["a", "b"]), &BTreeSet::new());
    let rows = vec![text_row(&[("a", "1"), ("c", "2")])];

    let err = rows_to_batch(&schema, &rows).unwrap_err();
    match err {
        crate::error::Error::SchemaMismatch { message } => {
            assert!(message.contains("missing column 'b'"));
        }
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_rows_to_batch_rejects_wrong_key_count() {
    let schema = schema_for_columns(&columns(&["a"]), &BTreeSet::new());
    let rows = vec![text_row(&[("a", "1"), ("b", "2")])];

    let err = rows_to_batch(&schema, &rows).unwrap_err();
    assert!(err.to_string().contains("schema mismatch"));
}

#[test]
fn test_rows_to_batch_rejects_wrong_cell_type() {
    let schema = schema_for_columns(&columns(&["size"]), &ints(&["size"]));
    let rows = vec![text_row(&[("size", "5")])];

    let err = rows_to_batch(&schema, &rows).unwrap_err();
    assert!(err.to_string().contains("integer column 'size'"));
}

// ============================================================================
// Chunked Writing
// ============================================================================

#[test]
fn test_chunked_writer_one_row_group_per_chunk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.parquet");

    let cols = columns(&["v"]);
    let mut writer =
        ChunkedWriter::new(&path, &cols, &BTreeSet::new(), 2, ParquetWriterConfig::new()).unwrap();

    for i in 0..5 {
        writer.push(text_row(&[("v", &i.to_string())])).unwrap();
    }
    assert_eq!(writer.batches_flushed(), 2);
    assert_eq!(writer.buffered(), 1);

    let summary = writer.finish().unwrap();
    assert_eq!(summary.rows_written, 5);
    assert_eq!(summary.batches_flushed, 3);

    assert_eq!(read_row_group_sizes(&path), vec![2, 2, 1]);

    // All row-groups share the file's single schema.
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let mut total = 0;
    for batch in reader {
        let batch = batch.unwrap();
        assert_eq!(batch.num_columns(), 1);
        total += batch.num_rows();
    }
    assert_eq!(total, 5);
}

#[test]
fn test_chunked_writer_is_lazy_until_first_flush() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.parquet");

    let cols = columns(&["v"]);
    let mut writer =
        ChunkedWriter::new(&path, &cols, &BTreeSet::new(), 4, ParquetWriterConfig::new()).unwrap();

    writer.push(text_row(&[("v", "x")])).unwrap();
    assert!(!path.exists());

    writer.flush().unwrap();
    assert!(path.exists());
    writer.finish().unwrap();
}

#[test]
fn test_chunked_writer_no_rows_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.parquet");

    let cols = columns(&["v"]);
    let writer =
        ChunkedWriter::new(&path, &cols, &BTreeSet::new(), 2, ParquetWriterConfig::new()).unwrap();

    let summary = writer.finish().unwrap();
    assert_eq!(summary, WriterSummary::default());
    assert!(!path.exists());
}

#[test]
fn test_abort_preserves_flushed_row_groups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.parquet");

    let cols = columns(&["v"]);
    let mut writer =
        ChunkedWriter::new(&path, &cols, &BTreeSet::new(), 2, ParquetWriterConfig::new()).unwrap();

    for i in 0..3 {
        writer.push(text_row(&[("v", &i.to_string())])).unwrap();
    }
    assert_eq!(writer.batches_flushed(), 1);
    writer.abort();

    // The buffered third row is gone; the flushed chunk reads back fine.
    assert_eq!(read_row_group_sizes(&path), vec![2]);
}

#[test]
fn test_abort_before_any_flush_leaves_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.parquet");

    let cols = columns(&["v"]);
    let mut writer =
        ChunkedWriter::new(&path, &cols, &BTreeSet::new(), 8, ParquetWriterConfig::new()).unwrap();

    writer.push(text_row(&[("v", "x")])).unwrap();
    writer.abort();
    assert!(!path.exists());
}

#[test]
fn test_chunk_size_zero_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.parquet");

    let cols = columns(&["v"]);
    let err = ChunkedWriter::new(&path, &cols, &BTreeSet::new(), 0, ParquetWriterConfig::new())
        .unwrap_err();
    assert!(err.to_string().contains("chunk size"));
}

#[test]
fn test_writer_config_compressions() {
    let config = ParquetWriterConfig::new().uncompressed();
    assert!(format!("{config:?}").contains("UNCOMPRESSED"));

    let config = ParquetWriterConfig::new().zstd();
    assert!(format!("{config:?}").contains("ZSTD"));

    let config = ParquetWriterConfig::new().gzip();
    assert!(format!("{config:?}").contains("GZIP"));

    let config = ParquetWriterConfig::new()
        .with_dictionary(false)
        .with_statistics(false)
        .with_row_group_size(64);
    assert!(format!("{config:?}").contains("row_group_size: 64"));
}
