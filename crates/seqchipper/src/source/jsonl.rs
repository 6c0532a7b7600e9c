//! # JSON Lines Shards

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use serde_json::Value;

use crate::{
    errors::SCResult,
    records::{FieldValue, RawRecord, SEQUENCE_FIELD_NAMES},
};

/// Convert a JSON value into a [`RawRecord`].
///
/// Only the [`SEQUENCE_FIELD_NAMES`] fields are retained;
/// a non-object value yields a record with no fields.
pub fn record_from_json(value: Value) -> RawRecord {
    match value {
        Value::Object(mut map) => SEQUENCE_FIELD_NAMES
            .iter()
            .filter_map(|&name| map.remove(name).map(|v| (name, FieldValue::from(v))))
            .collect(),
        _ => RawRecord::default(),
    }
}

/// Read records from a stream of whitespace-separated JSON values.
pub fn read_jsonl_records<R: Read>(reader: R) -> SCResult<Vec<RawRecord>> {
    let mut records = Vec::new();
    for value in serde_json::Deserializer::from_reader(reader).into_iter::<Value>() {
        records.push(record_from_json(value?));
    }
    Ok(records)
}

/// Load records from a JSON lines file.
pub fn load_jsonl_records_path<P: AsRef<Path>>(path: P) -> SCResult<Vec<RawRecord>> {
    read_jsonl_records(BufReader::new(File::open(path)?))
}
