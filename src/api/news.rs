//! News queue, approval workflow, feeds and external fetch endpoints

use tracing::info;

use crate::api::client::ApiClient;
use crate::api::models::{
    ExternalFetchRequest, ExternalFetchResponse, Feed, FeedCreate, NewsCreate, NewsItem,
    NewsUpdate, SourceType, StatusResponse,
};
use crate::error::Result;

impl ApiClient {
    /// Live items, ordered by the server (priority, then newest)
    pub async fn list_news(&self) -> Result<Vec<NewsItem>> {
        self.get_json("/api/news").await
    }

    /// Every item including drafts, newest first
    pub async fn list_admin_news(&self) -> Result<Vec<NewsItem>> {
        self.get_json("/api/admin/news").await
    }

    pub async fn create_news(&self, item: &NewsCreate) -> Result<NewsItem> {
        let created: NewsItem = self.post_json("/api/news", item).await?;
        info!(id = created.id, active = created.is_active, "News item created");
        Ok(created)
    }

    pub async fn update_news(&self, id: i64, update: &NewsUpdate) -> Result<NewsItem> {
        self.put_json(&format!("/api/news/{}", id), update).await
    }

    pub async fn set_news_active(&self, id: i64, is_active: bool) -> Result<NewsItem> {
        let update = NewsUpdate {
            is_active: Some(is_active),
            ..Default::default()
        };
        self.update_news(id, &update).await
    }

    pub async fn delete_news(&self, id: i64) -> Result<StatusResponse> {
        self.delete(&format!("/api/news/{}", id)).await
    }

    pub async fn approve_news(&self, id: i64) -> Result<StatusResponse> {
        self.post_empty(&format!("/api/admin/news/{}/approve", id)).await
    }

    pub async fn reject_news(&self, id: i64) -> Result<StatusResponse> {
        self.post_empty(&format!("/api/admin/news/{}/reject", id)).await
    }

    /// Put one item on the main screen
    pub async fn show_news(&self, id: i64) -> Result<StatusResponse> {
        self.post_empty(&format!("/api/news/{}/show", id)).await
    }

    /// Preview items from an RSS feed or a scraped article
    pub async fn fetch_external(
        &self,
        url: &str,
        source_type: SourceType,
    ) -> Result<ExternalFetchResponse> {
        let request = ExternalFetchRequest {
            url: url.to_string(),
            source_type,
        };
        self.post_json("/api/news/fetch-external", &request).await
    }

    pub async fn list_feeds(&self) -> Result<Vec<Feed>> {
        self.get_json("/api/feeds").await
    }

    pub async fn create_feed(&self, feed: &FeedCreate) -> Result<Feed> {
        self.post_json("/api/feeds", feed).await
    }

    pub async fn delete_feed(&self, id: i64) -> Result<StatusResponse> {
        self.delete(&format!("/api/feeds/{}", id)).await
    }
}
