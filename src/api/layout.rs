//! Overlay layout configuration and content filter endpoints

use crate::api::client::ApiClient;
use crate::api::models::{ConfigUpdate, FilterConfig, LayoutConfig, StatusResponse};
use crate::error::{AppError, Result};

impl ApiClient {
    pub async fn layout_config(&self) -> Result<LayoutConfig> {
        self.get_json("/api/config").await
    }

    pub async fn update_layout_config(&self, update: &ConfigUpdate) -> Result<StatusResponse> {
        if update.is_empty() {
            return Err(AppError::InvalidRequest(
                "Config update has no fields set".to_string(),
            ));
        }
        self.post_json("/api/config", update).await
    }

    pub async fn filters(&self) -> Result<Vec<String>> {
        self.get_json("/api/config/filters").await
    }

    /// Replace the blocked words/symbols list
    pub async fn set_filters(&self, filters: Vec<String>) -> Result<FilterConfig> {
        let body = FilterConfig { filters };
        let ack: StatusResponse = self.post_json("/api/config/filters", &body).await?;
        let stored = ack
            .extra
            .get("filters")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or(body.filters);
        Ok(FilterConfig { filters: stored })
    }
}

/// Split a comma-joined filter input into trimmed, non-empty entries
pub fn parse_filter_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Join filters back into the comma-separated form used for editing
pub fn join_filter_list(filters: &[String]) -> String {
    filters.join(", ")
}
