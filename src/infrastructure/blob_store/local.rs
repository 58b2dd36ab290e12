//! Filesystem-backed blob store, rooted at a directory.

use crate::domain::errors::StoreError;
use crate::domain::ports::BlobStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::info;

pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map an object key to a file under the root. Keys may not escape it.
    pub fn resolve(&self, path: &str) -> Result<PathBuf, StoreError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if path.is_empty() || escapes {
            return Err(StoreError::InvalidPath {
                path: path.to_string(),
                reason: "must be a relative path inside the store root".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }

    fn io_error(path: &str, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let file = self.resolve(path)?;
        match fs::read(&file).await {
            Ok(content) => {
                info!("Read {:?} ({} bytes)", file, content.len());
                Ok(content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                path: path.to_string(),
            }),
            Err(e) => Err(Self::io_error(path, e)),
        }
    }

    async fn write(
        &self,
        path: &str,
        content: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StoreError> {
        let file = self.resolve(path)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(path, e))?;
        }

        // Atomic write: write to temp file then rename
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = file.with_file_name(format!(".{}.tmp", file_name));
        fs::write(&temp_path, &content)
            .await
            .map_err(|e| Self::io_error(path, e))?;
        fs::rename(&temp_path, &file)
            .await
            .map_err(|e| Self::io_error(path, e))?;

        info!("Wrote {:?} ({} bytes)", file, content.len());
        Ok(())
    }
}
