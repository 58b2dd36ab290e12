//! Google Cloud Storage adapter using the JSON API media endpoints.

use crate::config::StoreEnvConfig;
use crate::domain::errors::StoreError;
use crate::domain::ports::BlobStore;
use crate::infrastructure::core::HttpClientFactory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info};
use url::Url;

pub struct GcsBlobStore {
    client: Client,
    base_url: Url,
    bucket: String,
    access_token: Option<String>,
}

impl GcsBlobStore {
    pub fn new(config: &StoreEnvConfig) -> Result<Self> {
        let base_url = Url::parse(&config.gcs_api_base_url)
            .with_context(|| format!("Invalid GCS_API_BASE_URL: {}", config.gcs_api_base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid GCS_API_BASE_URL: {}", config.gcs_api_base_url);
        }

        Ok(Self {
            client: HttpClientFactory::create_client(config.timeout_secs),
            base_url,
            bucket: config.bucket.clone(),
            access_token: config.gcs_access_token.clone(),
        })
    }

    /// `{base}/storage/v1/b/{bucket}/o/{object}`, object key percent-encoded
    /// as a single segment.
    pub fn download_url(&self, path: &str) -> Url {
        self.url_with_segments(&["storage", "v1", "b", &self.bucket, "o", path])
    }

    /// `{base}/upload/storage/v1/b/{bucket}/o`
    pub fn upload_url(&self) -> Url {
        self.url_with_segments(&["upload", "storage", "v1", "b", &self.bucket, "o"])
    }

    fn url_with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(path: &str, response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    fn transport_error(path: &str, e: reqwest::Error) -> StoreError {
        StoreError::Io {
            path: path.to_string(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for GcsBlobStore {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let mut url = self.download_url(path);
        url.query_pairs_mut().append_pair("alt", "media");
        debug!("GcsBlobStore: GET {}", url);

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| Self::transport_error(path, e))?;
        let response = Self::check(path, response).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::transport_error(path, e))?;
        info!("Fetched gs://{}/{} ({} bytes)", self.bucket, path, bytes.len());
        Ok(bytes.to_vec())
    }

    async fn write(
        &self,
        path: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let size = content.len();
        let request = self
            .client
            .post(self.upload_url())
            .query(&[("uploadType", "media"), ("name", path)])
            .header(CONTENT_TYPE, content_type)
            .body(content);

        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| Self::transport_error(path, e))?;
        Self::check(path, response).await?;

        info!("Uploaded gs://{}/{} ({} bytes)", self.bucket, path, size);
        Ok(())
    }
}
