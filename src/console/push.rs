//! Push handlers wiring the channels into console state

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::channel::{LogEvent, NewsEvent, PushHandler};
use crate::console::log_buffer::LogBuffer;
use crate::console::news_desk::NewsDesk;
use crate::console::stream_monitor::{Observation, StreamMonitor};

/// `/ws/news`: queue invalidations and pushed stream status
pub struct NewsPushHandler {
    desk: Arc<NewsDesk>,
    stream: Option<Arc<StreamMonitor>>,
}

impl NewsPushHandler {
    pub fn new(desk: Arc<NewsDesk>, stream: Option<Arc<StreamMonitor>>) -> Self {
        Self { desk, stream }
    }
}

#[async_trait]
impl PushHandler for NewsPushHandler {
    fn channel(&self) -> &str {
        "news"
    }

    async fn on_message(&self, text: &str) {
        let event = match NewsEvent::parse(text) {
            Ok(event) => event,
            Err(e) => {
                warn!(channel = "news", error = %e, "Undecodable push message");
                return;
            }
        };

        info!(channel = "news", event = %event.event_type, id = ?event.news_id(), "Push received");

        if let (Some(running), Some(stream)) = (event.stream_running(), &self.stream) {
            stream.observe(Observation::push(running));
        }

        if let Err(e) = self.desk.handle_push(&event).await {
            warn!(error = %e, "News refresh after push failed");
        }
    }
}

/// `/ws/logs`: server log lines into the bounded buffer
pub struct LogPushHandler {
    buffer: Arc<LogBuffer>,
}

impl LogPushHandler {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }
}

#[async_trait]
impl PushHandler for LogPushHandler {
    fn channel(&self) -> &str {
        "logs"
    }

    async fn on_message(&self, text: &str) {
        match LogEvent::parse(text) {
            Ok(event) => {
                self.buffer.push(event.log);
            }
            Err(e) => warn!(channel = "logs", error = %e, "Undecodable push message"),
        }
    }
}
