//! # Parquet Shards

use std::{fs::File, path::Path};

use arrow::{
    array::{Array, ArrayRef, AsArray},
    datatypes::DataType,
    record_batch::RecordBatch,
    util::display::array_value_to_string,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::{
    errors::SCResult,
    records::{FieldValue, RawRecord, SEQUENCE_FIELD_NAMES},
};

/// Read a single cell as a [`FieldValue`].
pub fn field_value_at(
    array: &ArrayRef,
    row: usize,
) -> SCResult<FieldValue> {
    if array.is_null(row) {
        return Ok(FieldValue::Null);
    }
    Ok(match array.data_type() {
        DataType::Utf8 => FieldValue::Text(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => FieldValue::Text(array.as_string::<i64>().value(row).to_string()),
        DataType::Utf8View => FieldValue::Text(array.as_string_view().value(row).to_string()),
        _ => FieldValue::Other(array_value_to_string(&**array, row)?),
    })
}

/// Convert a [`RecordBatch`] into [`RawRecord`]s.
///
/// Only the [`SEQUENCE_FIELD_NAMES`] columns are read.
pub fn records_from_batch(batch: &RecordBatch) -> SCResult<Vec<RawRecord>> {
    let columns: Vec<(&str, &ArrayRef)> = SEQUENCE_FIELD_NAMES
        .iter()
        .filter_map(|&name| batch.column_by_name(name).map(|c| (name, c)))
        .collect();

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let mut fields = Vec::with_capacity(columns.len());
        for &(name, column) in &columns {
            fields.push((name, field_value_at(column, row)?));
        }
        records.push(fields.into_iter().collect());
    }
    Ok(records)
}

/// Load records from a parquet file.
pub fn load_parquet_records_path<P: AsRef<Path>>(path: P) -> SCResult<Vec<RawRecord>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(records_from_batch(&batch?)?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn sample_batch() -> RecordBatch {
        let sequence: ArrayRef = Arc::new(StringArray::from(vec![
            Some("ACGT"),
            None,
            Some("NNAC"),
        ]));
        let label: ArrayRef = Arc::new(Int64Array::from(vec![1, 2, 3]));
        RecordBatch::try_from_iter(vec![("sequence", sequence), ("label", label)]).unwrap()
    }

    #[test]
    fn test_records_from_batch() {
        let records = records_from_batch(&sample_batch()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], RawRecord::from_sequence("ACGT"));
        assert_eq!(records[1].sequence_value(), Some(&FieldValue::Null));
        assert_eq!(records[2], RawRecord::from_sequence("NNAC"));
        assert_eq!(records[0].field("label"), None);
    }

    #[test]
    fn test_non_text_column() {
        let seq: ArrayRef = Arc::new(Int64Array::from(vec![12]));
        let batch = RecordBatch::try_from_iter(vec![("Seq", seq)]).unwrap();

        let records = records_from_batch(&batch).unwrap();
        assert_eq!(
            records[0].sequence_value(),
            Some(&FieldValue::Other("12".to_string()))
        );
    }

    #[test]
    fn test_load_parquet_records_path() {
        let batch = sample_batch();

        tempdir::TempDir::new("parquet_test")
            .and_then(|dir| {
                let path = dir.path().join("train-00000-of-00001.parquet");

                let file = File::create(&path)?;
                let mut writer =
                    ArrowWriter::try_new(file, batch.schema(), None).expect("writer");
                writer.write(&batch).expect("write");
                writer.close().expect("close");

                let records = load_parquet_records_path(&path).expect("load");
                assert_eq!(records, records_from_batch(&batch).unwrap());

                Ok(())
            })
            .unwrap();
    }
}
