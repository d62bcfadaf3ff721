//! Stream control endpoints

use tracing::info;

use crate::api::client::ApiClient;
use crate::api::models::{StatusResponse, StreamStartRequest, StreamStatus};
use crate::error::Result;

impl ApiClient {
    pub async fn start_stream(&self, request: &StreamStartRequest) -> Result<StatusResponse> {
        let response: StatusResponse = self.post_json("/api/stream/start", request).await?;
        info!(
            status = response.status.as_deref().unwrap_or("unknown"),
            backup = request.backup_rtmp_url.is_some(),
            "Stream start requested"
        );
        Ok(response)
    }

    pub async fn stop_stream(&self) -> Result<StatusResponse> {
        let response: StatusResponse = self.post_empty("/api/stream/stop").await?;
        info!("Stream stop requested");
        Ok(response)
    }

    pub async fn stream_status(&self) -> Result<StreamStatus> {
        self.get_json("/api/stream/status").await
    }
}
