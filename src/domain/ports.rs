use crate::domain::errors::{ObservationError, StoreError};
use crate::domain::monitoring::RawTable;
use async_trait::async_trait;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Object storage holding the observation batch, the baseline snapshot and
/// the artifacts written by each run.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StoreError>;

    async fn write(&self, path: &str, content: Vec<u8>, content_type: &str)
    -> Result<(), StoreError>;
}

/// Turns delimited text into a header row plus string records.
pub trait TabularDecoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<RawTable, ObservationError>;
}
