use crate::config::{StoreBackend, StoreEnvConfig};
use crate::domain::ports::BlobStore;
use crate::infrastructure::blob_store::{GcsBlobStore, LocalBlobStore};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub struct StoreFactory;

impl StoreFactory {
    pub fn create_store(config: &StoreEnvConfig) -> Result<Arc<dyn BlobStore>> {
        match config.backend {
            StoreBackend::Gcs => {
                info!(
                    "Using GCS store: bucket={} endpoint={}",
                    config.bucket, config.gcs_api_base_url
                );
                if config.gcs_access_token.is_none() {
                    info!("GCS_ACCESS_TOKEN not set, sending unauthenticated requests");
                }
                Ok(Arc::new(GcsBlobStore::new(config)?))
            }
            StoreBackend::Local => {
                info!("Using local store rooted at {:?}", config.local_root);
                Ok(Arc::new(LocalBlobStore::new(config.local_root.clone())))
            }
        }
    }
}
