//! Media upload, gallery and overlay endpoints

use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::api::client::ApiClient;
use crate::api::models::{MediaFile, OverlayData, OverlayUpdate, StatusResponse, UploadResponse};
use crate::error::{AppError, Result};

impl ApiClient {
    /// Upload a file from disk as multipart field `file`
    pub async fn upload_file(&self, path: &Path) -> Result<UploadResponse> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::InvalidRequest(format!("Not a file: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        self.upload_bytes(&name, bytes).await
    }

    pub async fn upload_bytes(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResponse> {
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        self.post_multipart("/api/upload", form).await
    }

    pub async fn list_media(&self) -> Result<Vec<MediaFile>> {
        self.get_json("/api/media").await
    }

    /// Main-screen update (`/api/overlay/update`); the server echoes the stored overlay
    pub async fn update_main_screen(&self, update: &OverlayUpdate) -> Result<OverlayData> {
        self.post_json("/api/overlay/update", update).await
    }

    /// Title/subtitle/info overlay update used by the control page
    pub async fn update_overlay(&self, update: &OverlayUpdate) -> Result<StatusResponse> {
        self.post_json("/api/overlay", update).await
    }

    pub async fn overlay_data(&self) -> Result<OverlayData> {
        self.get_json("/overlay/data").await
    }
}
