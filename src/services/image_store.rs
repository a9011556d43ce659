use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Settings;
use crate::error::ApiError;

/// A durably stored image: the serving URL plus the store's id for deletes.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredImage {
    pub public_id: String,
    pub secure_url: String,
}

/// External store for binary assets; upload a buffer into a folder and get
/// back a durable URL, delete by id.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: &str,
    ) -> Result<StoredImage, ApiError>;
    async fn delete(&self, public_id: &str) -> Result<(), ApiError>;
}

pub struct HttpImageStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpImageStore {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs_f64(settings.upstream_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.image_store_url.trim_end_matches('/').to_string(),
            api_key: settings.image_store_api_key.clone(),
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        folder: &str,
    ) -> Result<StoredImage, ApiError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("upload")
            .mime_str(content_type)
            .map_err(|e| ApiError::validation(format!("Unrecognized content type: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!("{}/v1/images", self.base_url);
        let response = self
            .authorized(self.client.post(&url))
            .query(&[("folder", folder)])
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::upstream(format!(
                "image upload failed ({}): {}",
                status, detail
            )));
        }

        let stored = response.json::<StoredImage>().await?;
        tracing::debug!(public_id = %stored.public_id, "image uploaded");
        Ok(stored)
    }

    async fn delete(&self, public_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/v1/images/{}", self.base_url, public_id);
        let response = self.authorized(self.client.delete(&url)).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::upstream(format!(
                "image deletion failed ({})",
                response.status()
            )));
        }

        Ok(())
    }
}
