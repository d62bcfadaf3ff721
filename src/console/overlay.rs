//! Overlay form: title, subtitle, info line and the main-screen webview

use tokio::sync::RwLock;
use tracing::info;

use crate::api::client::ApiClient;
use crate::api::models::{OverlayData, OverlayUpdate};
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayFields {
    pub title: String,
    pub subtitle: String,
    pub info: String,
    pub webview_url: String,
    pub hide_overlays: bool,
}

impl OverlayFields {
    /// Overwrite only the fields the server sent with a non-empty value
    pub fn merge(&mut self, data: &OverlayData) {
        fn take(target: &mut String, value: &Option<String>) {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                *target = v.to_string();
            }
        }

        take(&mut self.title, &data.title);
        take(&mut self.subtitle, &data.subtitle);
        take(&mut self.info, &data.info);
        take(&mut self.webview_url, &data.webview_url);
        if let Some(hide) = data.hide_overlays {
            self.hide_overlays = hide;
        }
    }
}

pub struct OverlayForm {
    client: ApiClient,
    fields: RwLock<OverlayFields>,
}

impl OverlayForm {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            fields: RwLock::new(OverlayFields::default()),
        }
    }

    pub async fn fields(&self) -> OverlayFields {
        self.fields.read().await.clone()
    }

    pub async fn edit<F: FnOnce(&mut OverlayFields)>(&self, f: F) {
        f(&mut *self.fields.write().await);
    }

    /// Fill the form from `/overlay/data`
    pub async fn load(&self) -> Result<OverlayFields> {
        let data = self.client.overlay_data().await?;
        let mut fields = self.fields.write().await;
        fields.merge(&data);
        Ok(fields.clone())
    }

    /// Send the whole form to `/api/overlay`
    pub async fn push(&self) -> Result<()> {
        let fields = self.fields().await;
        self.send_form(fields).await?;
        info!("Overlay updated");
        Ok(())
    }

    async fn send_form(&self, fields: OverlayFields) -> Result<()> {
        let update = OverlayUpdate {
            title: Some(fields.title),
            subtitle: Some(fields.subtitle),
            info: Some(fields.info),
            webview_url: Some(fields.webview_url),
            hide_overlays: Some(fields.hide_overlays),
        };

        self.client.update_overlay(&update).await?;
        Ok(())
    }

    /// Point the main screen at a URL; an empty URL sends nothing
    pub async fn set_main_screen(&self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::InvalidRequest("Main screen URL is empty".to_string()));
        }

        let update = OverlayUpdate {
            webview_url: Some(url.to_string()),
            ..Default::default()
        };
        self.client.update_main_screen(&update).await?;
        self.fields.write().await.webview_url = url.to_string();

        info!(url = %url, "Main screen updated");
        Ok(())
    }

    /// Show or hide the overlays. Goes through the full form since the
    /// main-screen endpoint ignores `hide_overlays`; the local flag flips
    /// only after the server accepts.
    pub async fn set_hide_overlays(&self, hide: bool) -> Result<()> {
        let mut fields = self.fields.write().await;
        let next = OverlayFields {
            hide_overlays: hide,
            ..fields.clone()
        };
        self.send_form(next).await?;
        fields.hide_overlays = hide;

        info!(hide_overlays = hide, "Overlay visibility changed");
        Ok(())
    }
}
