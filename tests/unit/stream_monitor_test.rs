//! Unit tests for stream status reconciliation and stream control

use broadcast_console::console::{Observation, Preferences, StreamMonitor, StreamTarget};
use broadcast_console::ApiClient;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREFIX: &str = "rtmp://a.rtmp.youtube.com/live2/";

fn create_monitor(base_url: &str, dir: &tempfile::TempDir) -> Arc<StreamMonitor> {
    let client = ApiClient::with_base_url(base_url, Duration::from_secs(2)).unwrap();
    let preferences = Arc::new(Preferences::load(dir.path().join("prefs.json")));
    Arc::new(StreamMonitor::new(
        client,
        preferences,
        PREFIX,
        Duration::from_millis(20),
    ))
}

#[tokio::test]
async fn test_initial_state_is_offline() {
    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor("http://127.0.0.1:9", &dir);

    let state = monitor.current();
    assert!(!state.running);
    assert_eq!(state.label(), "OFFLINE");
    assert!(state.last.is_none());
}

#[tokio::test]
async fn test_stale_observation_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor("http://127.0.0.1:9", &dir);

    let earlier = Instant::now();
    let later = earlier + Duration::from_millis(50);

    assert!(monitor.observe(Observation::poll(true, later)));
    // A response to an older request arrives late
    assert!(!monitor.observe(Observation::poll(false, earlier)));

    let state = monitor.current();
    assert!(state.running);
    assert_eq!(state.label(), "ON AIR");
}

#[tokio::test]
async fn test_push_supersedes_earlier_poll() {
    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor("http://127.0.0.1:9", &dir);

    let poll_issued = Instant::now();
    assert!(monitor.observe(Observation::push(true)));
    assert!(!monitor.observe(Observation::poll(false, poll_issued)));
    assert!(monitor.current().running);
}

#[tokio::test]
async fn test_subscribers_notified_only_on_change() {
    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor("http://127.0.0.1:9", &dir);
    let mut rx = monitor.subscribe();

    monitor.observe(Observation::poll(true, Instant::now()));
    assert!(rx.has_changed().unwrap());
    rx.borrow_and_update();

    monitor.observe(Observation::poll(true, Instant::now()));
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_check_reads_status_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stream/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "running": true })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor(&server.uri(), &dir);

    let state = monitor.check().await;
    assert!(state.running);
    assert!(state.reachable);
}

#[tokio::test]
async fn test_check_failure_reads_as_offline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stream/status"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor(&server.uri(), &dir);
    monitor.observe(Observation::poll(true, Instant::now()));

    let state = monitor.check().await;
    assert!(!state.running);
    assert!(!state.reachable);
    assert_eq!(state.label(), "OFFLINE");
}

#[tokio::test]
async fn test_start_sends_expanded_key_and_remembers_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stream/start"))
        .and(body_json(json!({
            "rtmp_url": "rtmp://a.rtmp.youtube.com/live2/abcd-1234",
            "stream_key": "abcd-1234"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "started" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stream/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "running": true })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor(&server.uri(), &dir);

    let ack = assert_ok!(
        monitor
            .start(&StreamTarget {
                target: "abcd-1234".to_string(),
                backup_rtmp_url: None,
            })
            .await
    );
    assert_eq!(ack.status.as_deref(), Some("started"));

    // Key survives a reload of the preferences file
    let reloaded = Preferences::load(dir.path().join("prefs.json"));
    assert_eq!(reloaded.stream_key().as_deref(), Some("abcd-1234"));

    // The scheduled re-check picks up the new status
    let mut rx = monitor.subscribe();
    tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|state| state.running))
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_start_with_empty_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stream/start"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor(&server.uri(), &dir);

    assert_err!(
        monitor
            .start(&StreamTarget {
                target: "".to_string(),
                backup_rtmp_url: None,
            })
            .await
    );
}

#[tokio::test]
async fn test_start_with_saved_key_requires_a_key() {
    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor("http://127.0.0.1:9", &dir);

    assert_err!(monitor.start_with_saved_key().await);
}

#[tokio::test]
async fn test_poller_stops_on_shutdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stream/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "running": false })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let monitor = create_monitor(&server.uri(), &dir);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let handle = monitor.spawn_poller(Duration::from_millis(10), shutdown_rx);
    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown_tx.send_replace(true);

    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(monitor.current().reachable);
}
