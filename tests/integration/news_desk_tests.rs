//! News desk integration tests: headline form, toggles and push-driven refresh

use broadcast_console::api::models::ExternalItem;
use broadcast_console::channel::{NewsEvent, PushHandler};
use broadcast_console::console::{HeadlineDraft, NewsDesk, NewsPushHandler};
use broadcast_console::{ApiClient, AppError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_desk(server: &MockServer, admin_view: bool) -> NewsDesk {
    let client = ApiClient::with_base_url(&server.uri(), Duration::from_secs(2)).unwrap();
    NewsDesk::new(client, admin_view)
}

fn news_json(id: i64, news_type: &str, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title_tamil": format!("headline {}", id),
        "type": news_type,
        "category": "GENERAL",
        "is_active": active,
        "priority": 0
    })
}

async fn mount_queue(server: &MockServer, route: &str, expected: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            news_json(1, "BREAKING", true),
            news_json(2, "TICKER", true),
            news_json(3, "TICKER", false),
        ])))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_empty_headline_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let desk = create_desk(&server, false);
    let mut draft = HeadlineDraft::new("   ");

    let err = desk.submit_headline(&mut draft).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidRequest(ref msg) if msg == "Please enter a headline"));
    assert_eq!(draft.title, "   ");
}

#[tokio::test]
async fn test_submit_clears_title_without_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news"))
        .and(body_partial_json(json!({
            "title_tamil": "Flood warning for the coast",
            "type": "BREAKING",
            "is_active": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(news_json(11, "BREAKING", true)))
        .expect(1)
        .mount(&server)
        .await;
    mount_queue(&server, "/api/news", 0).await;

    let desk = create_desk(&server, false);
    let mut draft = HeadlineDraft {
        news_type: "BREAKING".to_string(),
        ..HeadlineDraft::new("  Flood warning for the coast ")
    };

    let created = desk.submit_headline(&mut draft).await.unwrap();
    assert_eq!(created.id, 11);
    assert!(draft.title.is_empty());
    assert_eq!(draft.news_type, "BREAKING");
}

#[tokio::test]
async fn test_failed_submit_keeps_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "db locked" })))
        .mount(&server)
        .await;

    let desk = create_desk(&server, false);
    let mut draft = HeadlineDraft::new("Still here");

    assert!(desk.submit_headline(&mut draft).await.is_err());
    assert_eq!(draft.title, "Still here");
}

#[tokio::test]
async fn test_draft_is_created_inactive() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news"))
        .and(body_partial_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(news_json(12, "TICKER", false)))
        .expect(1)
        .mount(&server)
        .await;

    let desk = create_desk(&server, true);
    let mut draft = HeadlineDraft::new("Awaiting review");

    let created = desk.submit_draft(&mut draft).await.unwrap();
    assert!(created.is_draft());
}

#[tokio::test]
async fn test_refresh_and_stats() {
    let server = MockServer::start().await;
    mount_queue(&server, "/api/admin/news", 1).await;

    let desk = create_desk(&server, true);
    let mut revision = desk.subscribe();

    assert_eq!(desk.refresh().await.unwrap(), 3);
    assert!(revision.has_changed().unwrap());

    let stats = desk.stats().await;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.active_tickers, 1);
    assert!(stats.breaking_active);
    assert_eq!(stats.drafts, 1);

    let pending = desk.pending().await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, 3);
}

#[tokio::test]
async fn test_toggle_sends_inverse_of_displayed_state() {
    let server = MockServer::start().await;
    mount_queue(&server, "/api/news", 1).await;
    Mock::given(method("PUT"))
        .and(path("/api/news/2"))
        .and(body_json(json!({ "is_active": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(news_json(2, "TICKER", false)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/news/3"))
        .and(body_json(json!({ "is_active": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(news_json(3, "TICKER", true)))
        .expect(1)
        .mount(&server)
        .await;

    let desk = create_desk(&server, false);
    desk.refresh().await.unwrap();

    assert!(!desk.toggle_active(2).await.unwrap());
    assert!(desk.toggle_active(3).await.unwrap());
}

#[tokio::test]
async fn test_toggle_unknown_item_is_not_found() {
    let server = MockServer::start().await;
    let desk = create_desk(&server, false);

    assert!(matches!(
        desk.toggle_active(77).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_news_push_refetches_exactly_once() {
    let server = MockServer::start().await;
    mount_queue(&server, "/api/news", 1).await;

    let desk = Arc::new(create_desk(&server, false));
    let handler = NewsPushHandler::new(desk.clone(), None);

    handler.on_message(r#"{"type": "NEWS_UPDATED", "payload": {"id": 2}}"#).await;

    assert_eq!(desk.items().await.len(), 3);
}

#[tokio::test]
async fn test_non_news_push_does_not_refetch() {
    let server = MockServer::start().await;
    mount_queue(&server, "/api/news", 0).await;

    let desk = create_desk(&server, false);

    let event = NewsEvent::parse(r#"{"type": "CONFIG_UPDATED", "payload": {}}"#).unwrap();
    assert!(!desk.handle_push(&event).await.unwrap());

    let handler = NewsPushHandler::new(Arc::new(desk), None);
    handler.on_message(r#"{"type": "OVERLAY_UPDATED"}"#).await;
    handler.on_message("garbage").await;
}

#[tokio::test]
async fn test_import_external_creates_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news"))
        .and(body_json(json!({
            "title_tamil": "Bridge reopens",
            "type": "TICKER",
            "category": "LOCAL",
            "is_active": false,
            "priority": 0,
            "source": "RSS",
            "source_url": "https://news.example.com/1",
            "external_id": "https://news.example.com/1",
            "media_url": "https://news.example.com/1.jpg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(news_json(21, "TICKER", false)))
        .expect(1)
        .mount(&server)
        .await;

    let desk = create_desk(&server, true);
    let item = ExternalItem {
        title: Some(" Bridge reopens ".to_string()),
        link: Some("https://news.example.com/1".to_string()),
        image: Some("https://news.example.com/1.jpg".to_string()),
        ..Default::default()
    };

    let created = desk.import_external(&item, "LOCAL").await.unwrap();
    assert_eq!(created.id, 21);

    // Items without a title are refused before any request
    assert!(desk.import_external(&ExternalItem::default(), "LOCAL").await.is_err());
}
