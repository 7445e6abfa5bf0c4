pub mod core;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{DataAccessError, Loaded};

impl From<csv::Error> for DataAccessError {
    fn from(value: csv::Error) -> Self {
        // read-side failures never propagate, so a csv error can only come
        // from the write path
        DataAccessError::WriteError(Box::new(value))
    }
}

impl From<std::io::Error> for DataAccessError {
    fn from(value: std::io::Error) -> Self {
        DataAccessError::WriteError(Box::new(value))
    }
}

/// Parses a header-prefixed flat file. Rows that fail to parse are counted
/// and skipped, never raised.
pub(crate) fn decode_records<T: DeserializeOwned>(contents: &str) -> Loaded<T> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(contents.as_bytes());
    let mut records = Vec::new();
    let mut skipped = 0;
    for row in reader.deserialize::<T>() {
        match row {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }
    Loaded::new(records, skipped)
}

/// Renders the full collection, header first. The caller replaces the
/// backing file wholesale with the returned text.
pub(crate) fn encode_records<T: Serialize>(records: &[T]) -> Result<String, DataAccessError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DataAccessError::WriteError(Box::new(e)))?;
    String::from_utf8(bytes).map_err(|e| DataAccessError::WriteError(Box::new(e)))
}
