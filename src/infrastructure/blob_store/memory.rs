use crate::domain::errors::StoreError;
use crate::domain::ports::BlobStore;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub content_type: String,
}

/// In-process blob store, used for tests and dry runs.
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    failing_writes: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, path: &str, content: impl Into<Vec<u8>>, content_type: &str) {
        self.objects.write().await.insert(
            path.to_string(),
            StoredObject {
                content: content.into(),
                content_type: content_type.to_string(),
            },
        );
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.read().await.get(path).cloned()
    }

    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Make every write to `path` fail with an I/O error
    pub async fn fail_writes_to(&self, path: &str) {
        self.failing_writes.write().await.insert(path.to_string());
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|o| o.content.clone())
            .ok_or_else(|| StoreError::NotFound {
                path: path.to_string(),
            })
    }

    async fn write(
        &self,
        path: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        if self.failing_writes.read().await.contains(path) {
            return Err(StoreError::Io {
                path: path.to_string(),
                reason: "injected write failure".to_string(),
            });
        }
        self.insert(path, content, content_type).await;
        Ok(())
    }
}
