//! Dataset Source
//!
//! Loads the raw CSV once at startup, either from the brasil.io endpoint
//! or from a local file, and hands it to [`Dataset::load`].
//! Nothing is re-fetched afterwards.

mod client;
mod csv_reader;
mod error;

pub use client::SourceClient;
pub use csv_reader::{decode_csv, read_csv_file};
pub use error::{SourceError, SourceResult};

use std::path::PathBuf;
use std::time::Duration;

use crate::dataset::Dataset;

/// Public brasil.io endpoint, state-level rows only
pub const DEFAULT_SOURCE_URL: &str =
    "https://brasil.io/dataset/covid19/caso?place_type=state&format=csv";

/// Where the dataset comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    /// Remote CSV fetched over HTTP
    Url { url: String, timeout: Duration },
    /// Local CSV file
    File(PathBuf),
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Url {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl DatasetSource {
    /// Human-readable location for logs
    pub fn location(&self) -> String {
        match self {
            DatasetSource::Url { url, .. } => url.clone(),
            DatasetSource::File(path) => path.display().to_string(),
        }
    }

    /// Fetch, decode and load the dataset
    pub async fn load(&self) -> SourceResult<Dataset> {
        tracing::info!(source = %self.location(), "Loading dataset");

        let raw = match self {
            DatasetSource::Url { url, timeout } => {
                let client = SourceClient::new(*timeout)?;
                let bytes = client.fetch(url).await?;
                decode_csv(&bytes)?
            }
            DatasetSource::File(path) => read_csv_file(path).await?,
        };

        let dataset = Dataset::load(raw);
        tracing::info!(stats = %dataset.stats(), "Dataset loaded");

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_source() {
        let source = DatasetSource::default();
        assert_eq!(source.location(), DEFAULT_SOURCE_URL);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "date,state,city,place_type,confirmed,deaths,is_last\n\
             2020-03-01,SP,,state,10,0,False\n\
             2020-03-02,SP,,state,15,1,True\n\
             2020-03-02,RJ,,state,4,0,True\n"
        )
        .unwrap();

        let source = DatasetSource::File(file.path().to_path_buf());
        let dataset = source.load().await.unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.region_keys().len(), 2);
        assert_eq!(dataset.first_region(), Some("SP"));
    }
}
