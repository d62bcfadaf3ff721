//! Media uploads and the gallery

use std::path::Path;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::client::ApiClient;
use crate::api::models::{MediaFile, UploadResponse};
use crate::error::{AppError, Result};

pub struct MediaDesk {
    client: ApiClient,
    gallery: RwLock<Vec<MediaFile>>,
}

impl MediaDesk {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            gallery: RwLock::new(Vec::new()),
        }
    }

    /// Upload a file and return its absolute URL (`origin + url`).
    /// The gallery is refreshed afterwards.
    pub async fn upload(&self, path: &Path) -> Result<String> {
        let response = self.client.upload_file(path).await?;
        self.finish_upload(response).await
    }

    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let response = self.client.upload_bytes(file_name, bytes).await?;
        self.finish_upload(response).await
    }

    async fn finish_upload(&self, response: UploadResponse) -> Result<String> {
        let Some(url) = response.url else {
            return Err(AppError::Api {
                status: 200,
                message: response
                    .error
                    .unwrap_or_else(|| "Upload response carried no url".to_string()),
            });
        };

        let absolute = self.client.endpoints().absolute_media_url(&url);
        info!(url = %absolute, "Media uploaded");

        if let Err(e) = self.refresh_gallery().await {
            warn!(error = %e, "Gallery refresh after upload failed");
        }

        Ok(absolute)
    }

    pub async fn refresh_gallery(&self) -> Result<usize> {
        let files = self.client.list_media().await?;
        let count = files.len();
        *self.gallery.write().await = files;
        Ok(count)
    }

    /// Last fetched gallery
    pub async fn gallery(&self) -> Vec<MediaFile> {
        self.gallery.read().await.clone()
    }
}
