//! CSV decoding
//!
//! Turns CSV bytes into a [`RawTable`]. No type conversion happens here;
//! that is the dataset loader's job.

use std::path::Path;

use super::error::{SourceError, SourceResult};
use crate::dataset::RawTable;

/// Decode CSV bytes with a header row
pub fn decode_csv(bytes: &[u8]) -> SourceResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SourceError::MissingHeader);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable::new(headers, rows))
}

/// Read and decode a local CSV file
pub async fn read_csv_file(path: &Path) -> SourceResult<RawTable> {
    let bytes = tokio::fs::read(path).await.map_err(|e| SourceError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    decode_csv(&bytes)
}
