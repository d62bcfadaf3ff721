//! News queue mirror and the headline workflow around it

use tokio::sync::{watch, RwLock};
use tracing::{debug, info};

use crate::api::client::ApiClient;
use crate::api::models::{
    ExternalItem, NewsCreate, NewsItem, StatusResponse, NEWS_TYPE_TICKER,
};
use crate::channel::NewsEvent;
use crate::error::{AppError, Result};

/// Headline form state. The title is cleared only after a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineDraft {
    pub title: String,
    pub news_type: String,
    pub category: String,
    pub priority: i32,
    /// false creates a Draft/Pending item awaiting approval
    pub publish: bool,
    pub media_url: Option<String>,
}

impl HeadlineDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

impl Default for HeadlineDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            news_type: NEWS_TYPE_TICKER.to_string(),
            category: "GENERAL".to_string(),
            priority: 0,
            publish: true,
            media_url: None,
        }
    }
}

/// Counters shown next to the queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    pub total: usize,
    pub active_tickers: usize,
    pub breaking_active: bool,
    pub drafts: usize,
}

/// Owns the in-memory mirror of the news queue.
///
/// The mirror has a single writer, [`NewsDesk::refresh`]. Mutating operations
/// never patch it directly; the server answers them with a `NEWS_*` push that
/// triggers the refresh.
pub struct NewsDesk {
    client: ApiClient,
    admin_view: bool,
    queue: RwLock<Vec<NewsItem>>,
    revision: watch::Sender<u64>,
}

impl NewsDesk {
    pub fn new(client: ApiClient, admin_view: bool) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            client,
            admin_view,
            queue: RwLock::new(Vec::new()),
            revision,
        }
    }

    /// Re-fetch the queue and replace the mirror
    pub async fn refresh(&self) -> Result<usize> {
        let items = if self.admin_view {
            self.client.list_admin_news().await?
        } else {
            self.client.list_news().await?
        };

        let count = items.len();
        *self.queue.write().await = items;
        self.revision.send_modify(|rev| *rev += 1);

        debug!(items = count, "News queue refreshed");
        Ok(count)
    }

    /// Snapshot of the mirror
    pub async fn items(&self) -> Vec<NewsItem> {
        self.queue.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<NewsItem> {
        self.queue.read().await.iter().find(|item| item.id == id).cloned()
    }

    /// Drafts awaiting approval
    pub async fn pending(&self) -> Vec<NewsItem> {
        self.queue
            .read()
            .await
            .iter()
            .filter(|item| item.is_draft())
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> QueueStats {
        let queue = self.queue.read().await;
        QueueStats {
            total: queue.len(),
            active_tickers: queue.iter().filter(|i| i.is_active && i.is_ticker()).count(),
            breaking_active: queue.iter().any(|i| i.is_active && i.is_breaking()),
            drafts: queue.iter().filter(|i| i.is_draft()).count(),
        }
    }

    /// Bumped after every refresh
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Submit the headline form.
    ///
    /// An empty or whitespace-only title is rejected before any request is
    /// made. On success the title is cleared and the mirror is left alone.
    pub async fn submit_headline(&self, draft: &mut HeadlineDraft) -> Result<NewsItem> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidRequest("Please enter a headline".to_string()));
        }

        let mut payload = NewsCreate::new(title);
        payload.news_type = draft.news_type.clone();
        payload.category = draft.category.clone();
        payload.priority = draft.priority;
        payload.is_active = draft.publish;
        payload.media_url = draft.media_url.clone();

        let created = self.client.create_news(&payload).await?;
        draft.title.clear();
        Ok(created)
    }

    /// Submit the form as a Draft/Pending item awaiting approval
    pub async fn submit_draft(&self, draft: &mut HeadlineDraft) -> Result<NewsItem> {
        draft.publish = false;
        self.submit_headline(draft).await
    }

    /// Create a draft from an item returned by an external fetch
    pub async fn import_external(&self, item: &ExternalItem, category: &str) -> Result<NewsItem> {
        let title = item.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(AppError::InvalidRequest(
                "External item has no title".to_string(),
            ));
        }

        let mut payload = NewsCreate::new(title);
        payload.category = category.to_string();
        payload.is_active = false;
        payload.source = item.source.clone().unwrap_or_else(|| "RSS".to_string());
        payload.source_url = item.link.clone();
        payload.external_id = item.link.clone();
        payload.media_url = item.image.clone();

        let created = self.client.create_news(&payload).await?;
        info!(id = created.id, source = %payload.source, "Imported external item as draft");
        Ok(created)
    }

    /// Flip an item's active flag relative to what the mirror currently shows.
    /// Returns the state that was requested.
    pub async fn toggle_active(&self, id: i64) -> Result<bool> {
        let displayed = self
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("News item {} is not in the queue", id)))?
            .is_active;

        self.client.set_news_active(id, !displayed).await?;
        Ok(!displayed)
    }

    pub async fn delete(&self, id: i64) -> Result<StatusResponse> {
        self.client.delete_news(id).await
    }

    pub async fn approve(&self, id: i64) -> Result<StatusResponse> {
        let ack = self.client.approve_news(id).await?;
        info!(id, "News item approved");
        Ok(ack)
    }

    pub async fn reject(&self, id: i64) -> Result<StatusResponse> {
        let ack = self.client.reject_news(id).await?;
        info!(id, "News item rejected");
        Ok(ack)
    }

    pub async fn show_on_screen(&self, id: i64) -> Result<StatusResponse> {
        self.client.show_news(id).await
    }

    /// React to a news-channel push. Only `NEWS*` events trigger a re-fetch;
    /// returns whether one happened.
    pub async fn handle_push(&self, event: &NewsEvent) -> Result<bool> {
        if !event.is_news_change() {
            debug!(event = %event.event_type, "Ignoring non-news push");
            return Ok(false);
        }

        self.refresh().await?;
        Ok(true)
    }
}
