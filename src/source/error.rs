//! Source error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or decoding the dataset
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Local file could not be read
    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// CSV decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input has no header row
    #[error("CSV input has no header row")]
    MissingHeader,
}

/// Result type alias for source operations
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::Status {
            url: "https://example.org/data.csv".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 503 from https://example.org/data.csv"
        );

        assert_eq!(
            SourceError::MissingHeader.to_string(),
            "CSV input has no header row"
        );
    }
}
