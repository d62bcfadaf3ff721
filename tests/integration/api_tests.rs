//! API client integration tests against a mocked broadcast server

use broadcast_console::api::models::{
    ConfigUpdate, FeedCreate, LayoutMode, NewsCreate, OverlayUpdate, SourceType,
};
use broadcast_console::{ApiClient, AppError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri(), Duration::from_secs(2)).unwrap()
}

fn news_json(id: i64, title: &str, news_type: &str, active: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title_tamil": title,
        "type": news_type,
        "category": "GENERAL",
        "is_active": active,
        "priority": 0,
        "created_at": "2024-11-02T08:15:30",
        "source": "MANUAL"
    })
}

#[tokio::test]
async fn test_list_news() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            news_json(1, "Rain alert", "BREAKING", true),
            news_json(2, "Markets open higher", "TICKER", true),
        ])))
        .mount(&server)
        .await;

    let items = create_client(&server).list_news().await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_breaking());
    assert!(items[1].is_ticker());
}

#[tokio::test]
async fn test_create_news_sends_wire_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news"))
        .and(body_json(json!({
            "title_tamil": "Polling closes at six",
            "type": "TICKER",
            "category": "POLITICS",
            "is_active": true,
            "priority": 3,
            "source": "MANUAL"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(news_json(9, "Polling closes at six", "TICKER", true)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut create = NewsCreate::new("Polling closes at six");
    create.category = "POLITICS".to_string();
    create.priority = 3;

    let created = create_client(&server).create_news(&create).await.unwrap();
    assert_eq!(created.id, 9);
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/news/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "detail": "News item not found" })),
        )
        .mount(&server)
        .await;

    let err = create_client(&server).delete_news(404).await.unwrap_err();
    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "News item not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_without_body_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/feeds"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = create_client(&server).list_feeds().await.unwrap_err();
    assert!(err.is_api());
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let client = ApiClient::with_base_url("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
    let err = client.stream_status().await.unwrap_err();
    assert!(matches!(err, AppError::HttpClient(_)));
}

#[tokio::test]
async fn test_approve_and_reject() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/news/5/approve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "approved" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/admin/news/6/reject"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "rejected" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_eq!(client.approve_news(5).await.unwrap().status.as_deref(), Some("approved"));
    assert_eq!(client.reject_news(6).await.unwrap().status.as_deref(), Some("rejected"));
}

#[tokio::test]
async fn test_fetch_external() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news/fetch-external"))
        .and(body_json(json!({ "url": "https://news.example.com/rss", "source_type": "RSS" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "items": [
                { "title": "Bridge reopens", "link": "https://news.example.com/1", "image": null },
                { "title": "Festival dates set", "summary": "Three days in March" }
            ]
        })))
        .mount(&server)
        .await;

    let response = create_client(&server)
        .fetch_external("https://news.example.com/rss", SourceType::Rss)
        .await
        .unwrap();
    assert_eq!(response.status, "success");
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[0].link.as_deref(), Some("https://news.example.com/1"));
}

#[tokio::test]
async fn test_fetch_external_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/news/fetch-external"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid source type" })),
        )
        .mount(&server)
        .await;

    let err = create_client(&server)
        .fetch_external("https://example.com", SourceType::Scraper)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Server returned 400: Invalid source type");
}

#[tokio::test]
async fn test_filters_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config/filters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["spam", "#"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/config/filters"))
        .and(body_json(json!({ "filters": ["spam", "#", "xxx"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "filters": ["spam", "#", "xxx"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_eq!(client.filters().await.unwrap(), vec!["spam", "#"]);

    let stored = client
        .set_filters(broadcast_console::api::parse_filter_list(" spam, #,, xxx "))
        .await
        .unwrap();
    assert_eq!(stored.filters.len(), 3);
}

#[tokio::test]
async fn test_layout_config_update() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/config"))
        .and(body_json(json!({ "ticker_speed": 25, "layout_mode": "L_BAR" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let update = ConfigUpdate {
        ticker_speed: Some(25),
        layout_mode: Some(LayoutMode::LBar),
        ..Default::default()
    };
    client.update_layout_config(&update).await.unwrap();

    // An empty update is rejected locally
    assert!(matches!(
        client.update_layout_config(&ConfigUpdate::default()).await,
        Err(AppError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn test_overlay_update_sends_present_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/overlay"))
        .and(body_json(json!({ "title": "Evening Bulletin", "hide_overlays": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let update = OverlayUpdate {
        title: Some("Evening Bulletin".to_string()),
        hide_overlays: Some(false),
        ..Default::default()
    };
    create_client(&server).update_overlay(&update).await.unwrap();
}

#[tokio::test]
async fn test_upload_bytes_is_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("promo.png"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "url": "/static/uploads/promo.png" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = create_client(&server)
        .upload_bytes("promo.png", vec![0x89, 0x50, 0x4e, 0x47])
        .await
        .unwrap();
    assert_eq!(response.url.as_deref(), Some("/static/uploads/promo.png"));
}

#[tokio::test]
async fn test_feeds_and_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/feeds"))
        .and(body_json(json!({ "name": "Wire", "url": "https://wire.example.com/rss", "source_type": "RSS" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4, "name": "Wire", "url": "https://wire.example.com/rss", "source_type": "RSS", "is_active": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ads/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "campaign_id": 2, "type": "TICKER", "content": "Sponsored by Acme" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/voting/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_votes": 42, "results": { "A": 30, "B": 12 }
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);

    let feed = client
        .create_feed(&FeedCreate {
            name: "Wire".to_string(),
            url: "https://wire.example.com/rss".to_string(),
            source_type: SourceType::Rss,
        })
        .await
        .unwrap();
    assert_eq!(feed.id, 4);

    let ads = client.active_ads().await.unwrap();
    assert_eq!(ads[0].duration, 10);
    assert_eq!(ads[0].interval, 5);

    let stats = client.voting_stats().await.unwrap();
    assert_eq!(stats.total_votes, Some(42));
    assert!(stats.extra.contains_key("results"));
}
