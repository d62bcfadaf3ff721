//! Console module - client-side state of the admin view and its background tasks

pub mod log_buffer;
pub mod media_desk;
pub mod news_desk;
pub mod overlay;
pub mod preferences;
pub mod push;
pub mod stream_monitor;

pub use log_buffer::LogBuffer;
pub use media_desk::MediaDesk;
pub use news_desk::{HeadlineDraft, NewsDesk, QueueStats};
pub use overlay::{OverlayFields, OverlayForm};
pub use preferences::{PreferenceValues, Preferences};
pub use push::{LogPushHandler, NewsPushHandler};
pub use stream_monitor::{
    resolve_target, Observation, StatusSource, StreamMonitor, StreamState, StreamTarget,
};

use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::client::ApiClient;
use crate::api::models::{ConfigUpdate, LayoutMode};
use crate::channel::ReconnectingSocket;
use crate::config::Settings;
use crate::error::Result;

/// The admin view. Owns all console state; background tasks started by
/// [`AdminConsole::start`] live exactly as long as this value.
pub struct AdminConsole {
    settings: Settings,
    client: ApiClient,
    news: Arc<NewsDesk>,
    logs: Arc<LogBuffer>,
    stream: Arc<StreamMonitor>,
    media: Arc<MediaDesk>,
    overlay: Arc<OverlayForm>,
    preferences: Arc<Preferences>,
    shutdown: watch::Sender<bool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl AdminConsole {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let client = ApiClient::new(&settings)?;
        let preferences = Arc::new(Preferences::load(&settings.console.preferences_path));

        let stream = Arc::new(StreamMonitor::new(
            client.clone(),
            preferences.clone(),
            settings.stream.rtmp_prefix.clone(),
            settings.recheck_delay(),
        ));

        let (shutdown, _) = watch::channel(false);

        Ok(Self {
            news: Arc::new(NewsDesk::new(client.clone(), settings.console.admin_view)),
            logs: Arc::new(LogBuffer::new(settings.console.log_capacity)),
            media: Arc::new(MediaDesk::new(client.clone())),
            overlay: Arc::new(OverlayForm::new(client.clone())),
            stream,
            preferences,
            client,
            settings,
            shutdown,
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Initial fetches, then the two push channels and the status poller.
    /// Failed initial fetches are logged; the console keeps running.
    pub async fn start(&self) -> Result<()> {
        if let Err(e) = self.news.refresh().await {
            warn!(error = %e, "Initial news fetch failed");
        }
        if let Err(e) = self.overlay.load().await {
            warn!(error = %e, "Initial overlay fetch failed");
        }
        self.stream.check().await;

        let endpoints = self.client.endpoints();
        let news_url = endpoints.ws(&self.settings.channels.news_path)?;
        let logs_url = endpoints.ws(&self.settings.channels.logs_path)?;
        let delay = self.settings.reconnect_delay();

        let news_socket = ReconnectingSocket::new(
            news_url,
            delay,
            Arc::new(NewsPushHandler::new(self.news.clone(), Some(self.stream.clone()))),
        );
        let logs_socket = ReconnectingSocket::new(
            logs_url,
            delay,
            Arc::new(LogPushHandler::new(self.logs.clone())),
        );

        let mut tasks = self.tasks.lock();
        tasks.push(news_socket.spawn(self.shutdown.subscribe()));
        tasks.push(logs_socket.spawn(self.shutdown.subscribe()));
        tasks.push(
            self.stream
                .spawn_poller(self.settings.poll_interval(), self.shutdown.subscribe()),
        );

        info!(
            tasks = tasks.len(),
            preferences = %self.preferences.path().display(),
            "Admin console started"
        );
        Ok(())
    }

    /// Signal background tasks to stop and wait for them
    pub async fn shutdown(&self) {
        self.shutdown.send_replace(true);
        let handles: Vec<_> = self.tasks.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
        info!("Admin console stopped");
    }

    /// Upload a file and put its absolute URL into the main-screen field
    pub async fn upload_media(&self, path: &Path) -> Result<String> {
        let url = self.media.upload(path).await?;
        self.overlay
            .edit(|fields| fields.webview_url = url.clone())
            .await;
        Ok(url)
    }

    /// Switch between full-screen and L-Bar layout, locally and on the overlay
    pub async fn toggle_layout(&self) -> Result<LayoutMode> {
        let mode = self.preferences.layout_mode().toggled();
        let update = ConfigUpdate {
            layout_mode: Some(mode),
            ..Default::default()
        };
        self.client.update_layout_config(&update).await?;
        self.preferences.set_layout_mode(mode)?;
        info!(layout = %mode, "Layout mode changed");
        Ok(mode)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn news(&self) -> &Arc<NewsDesk> {
        &self.news
    }

    pub fn logs(&self) -> &Arc<LogBuffer> {
        &self.logs
    }

    pub fn stream(&self) -> &Arc<StreamMonitor> {
        &self.stream
    }

    pub fn media(&self) -> &Arc<MediaDesk> {
        &self.media
    }

    pub fn overlay(&self) -> &Arc<OverlayForm> {
        &self.overlay
    }

    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.preferences
    }
}

impl Drop for AdminConsole {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
        for handle in self.tasks.lock().drain(..) {
            handle.abort();
        }
    }
}
