//! Tests for engine module

use super::*;
use arrow::array::{Int64Array, StringArray};
use bson::doc;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_dump(dir: &TempDir, docs: &[bson::Document]) -> PathBuf {
    let path = dir.path().join("dump.bson");
    let mut file = File::create(&path).unwrap();
    for doc in docs {
        let mut bytes = Vec::new();
        doc.to_writer(&mut bytes).unwrap();
        file.write_all(&bytes).unwrap();
    }
    path
}

fn read_all_rows(path: &Path) -> Vec<arrow::record_batch::RecordBatch> {
    let file = File::open(path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    reader.map(|batch| batch.unwrap()).collect()
}

// ============================================================================
// ConvertOptions Tests
// ============================================================================

#[test]
fn test_options_default() {
    let options = ConvertOptions::default();
    assert!(options.exclude_substrings.is_empty());
    assert!(options.int_columns.is_empty());
    assert_eq!(options.limit, None);
    assert_eq!(options.chunk_size, DEFAULT_CHUNK_SIZE);
}

#[test]
fn test_options_builders() {
    let options = ConvertOptions::new()
        .with_exclusions(vec!["secret".to_string()])
        .with_int_columns(["size".to_string()])
        .with_limit(Some(10))
        .with_chunk_size(2);
    assert_eq!(options.exclude_substrings, vec!["secret"]);
    assert!(options.int_columns.contains("size"));
    assert_eq!(options.limit, Some(10));
    assert_eq!(options.chunk_size, 2);
}

// ============================================================================
// ConvertStats Tests
// ============================================================================

#[test]
fn test_stats_mutators() {
    let mut stats = ConvertStats::new();
    stats.add_scanned(3);
    stats.add_scanned(2);
    stats.set_columns(4);
    stats.set_written(5, 2);
    stats.set_duration(120);
    assert_eq!(stats.documents_scanned, 5);
    assert_eq!(stats.columns, 4);
    assert_eq!(stats.rows_written, 5);
    assert_eq!(stats.batches_flushed, 2);
    assert_eq!(stats.duration_ms, 120);
}

#[test]
fn test_stats_serialize() {
    let mut stats = ConvertStats::new();
    stats.set_columns(2);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["columns"], 2);
    assert_eq!(json["rows_written"], 0);
}

// ============================================================================
// Converter Tests
// ============================================================================

#[test]
fn test_convert_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(
        &dir,
        &[
            doc! { "a": 1, "b": { "c": 2 } },
            doc! { "a": 3 },
            doc! { "b": { "c": 4, "d": 5 } },
        ],
    );
    let output = dir.path().join("out.parquet");

    let stats = Converter::new(ConvertOptions::default())
        .run(&input, &output)
        .unwrap();

    assert_eq!(stats.documents_scanned, 3);
    assert_eq!(stats.columns, 3);
    assert_eq!(stats.rows_written, 3);
    assert_eq!(stats.batches_flushed, 1);

    let batches = read_all_rows(&output);
    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    let schema = batch.schema();
    let names: Vec<&str> = schema
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    assert_eq!(names, vec!["a", "b.c", "b.d"]);

    // Absent keys become empty strings.
    let a = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(a.value(0), "1");
    assert_eq!(a.value(1), "3");
    assert_eq!(a.value(2), "");
    let bc = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(bc.value(1), "");
    assert_eq!(bc.value(2), "4");
}

#[test]
fn test_convert_forces_int_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(
        &dir,
        &[
            doc! { "size": "5" },
            doc! { "size": 5.0 },
            doc! { "size": "abc" },
            doc! {},
        ],
    );
    let output = dir.path().join("out.parquet");

    let options = ConvertOptions::new().with_int_columns(["size".to_string()]);
    Converter::new(options).run(&input, &output).unwrap();

    let batches = read_all_rows(&output);
    let sizes = batches[0]
        .column(0)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(sizes.value(0), 5);
    assert_eq!(sizes.value(1), 5);
    assert_eq!(sizes.value(2), 0);
    assert_eq!(sizes.value(3), 0);
}

#[test]
fn test_limit_bounds_both_passes() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(
        &dir,
        &[
            doc! { "a": 1 },
            doc! { "a": 2 },
            doc! { "a": 3, "late": true },
            doc! { "a": 4 },
            doc! { "a": 5 },
        ],
    );
    let output = dir.path().join("out.parquet");

    let options = ConvertOptions::new().with_limit(Some(2));
    let stats = Converter::new(options).run(&input, &output).unwrap();

    assert_eq!(stats.documents_scanned, 2);
    assert_eq!(stats.rows_written, 2);
    // The third document never reached inference, so its key is absent.
    assert_eq!(stats.columns, 1);
}

#[test]
fn test_limit_larger_than_input() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(&dir, &[doc! { "a": 1 }, doc! { "a": 2 }]);
    let output = dir.path().join("out.parquet");

    let options = ConvertOptions::new().with_limit(Some(100));
    let stats = Converter::new(options).run(&input, &output).unwrap();

    assert_eq!(stats.documents_scanned, 2);
    assert_eq!(stats.rows_written, 2);
}

#[test]
fn test_empty_input_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.bson");
    File::create(&input).unwrap();
    let output = dir.path().join("out.parquet");

    let stats = Converter::new(ConvertOptions::default())
        .run(&input, &output)
        .unwrap();

    assert_eq!(stats.documents_scanned, 0);
    assert_eq!(stats.columns, 0);
    assert_eq!(stats.rows_written, 0);
    assert!(!output.exists());
}

#[test]
fn test_all_columns_excluded_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(&dir, &[doc! { "secret_key": 1 }]);
    let output = dir.path().join("out.parquet");

    let options = ConvertOptions::new().with_exclusions(vec!["secret".to_string()]);
    let stats = Converter::new(options).run(&input, &output).unwrap();

    assert_eq!(stats.documents_scanned, 1);
    assert_eq!(stats.columns, 0);
    assert!(!output.exists());
}

#[test]
fn test_truncated_input_fails_during_inference() {
    let dir = TempDir::new().unwrap();
    let input = write_dump(&dir, &[doc! { "a": 1 }]);
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(&input)
        .unwrap();
    // Declares 64 bytes but the stream ends after the header.
    file.write_all(&[64, 0, 0, 0]).unwrap();
    drop(file);
    let output = dir.path().join("out.parquet");

    let err = Converter::new(ConvertOptions::default())
        .run(&input, &output)
        .unwrap_err();

    assert!(err.is_truncation());
    assert!(!output.exists());
}

#[test]
fn test_chunked_run_counts_batches() {
    let dir = TempDir::new().unwrap();
    let docs: Vec<bson::Document> = (0..5).map(|i| doc! { "n": i }).collect();
    let input = write_dump(&dir, &docs);
    let output = dir.path().join("out.parquet");

    let options = ConvertOptions::new().with_chunk_size(2);
    let stats = Converter::new(options).run(&input, &output).unwrap();

    assert_eq!(stats.rows_written, 5);
    assert_eq!(stats.batches_flushed, 3);
}

#[test]
fn test_missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("does-not-exist.bson");
    let output = dir.path().join("out.parquet");

    let err = Converter::new(ConvertOptions::default())
        .run(&input, &output)
        .unwrap_err();

    assert!(err.to_string().contains("failed to open"));
}
