//! Unit tests for the bounded log view

use broadcast_console::channel::PushHandler;
use broadcast_console::console::{LogBuffer, LogPushHandler};
use std::sync::Arc;

#[test]
fn test_default_capacity() {
    let buffer = LogBuffer::default();
    assert_eq!(buffer.capacity(), 50);
    assert!(buffer.is_empty());
    assert!(buffer.snapshot().is_empty());
}

#[test]
fn test_sixty_lines_keep_last_fifty() {
    let buffer = LogBuffer::new(50);
    for i in 0..60 {
        buffer.push(format!("line {}", i));
    }

    let lines = buffer.snapshot();
    assert_eq!(lines.len(), 50);
    assert_eq!(lines.first().map(String::as_str), Some("line 10"));
    assert_eq!(lines.last().map(String::as_str), Some("line 59"));
    assert_eq!(buffer.total_received(), 60);
}

#[test]
fn test_clear_keeps_counter() {
    let buffer = LogBuffer::new(5);
    buffer.push("one");
    buffer.push("two");
    buffer.clear();

    assert!(buffer.is_empty());
    assert_eq!(buffer.total_received(), 2);
}

#[tokio::test]
async fn test_subscribers_see_new_lines() {
    let buffer = LogBuffer::new(10);
    buffer.push("before");

    let mut rx = buffer.subscribe();
    buffer.push("after");

    assert_eq!(rx.recv().await.unwrap(), "after");
}

#[tokio::test]
async fn test_log_handler_appends_payload() {
    let buffer = Arc::new(LogBuffer::new(10));
    let handler = LogPushHandler::new(buffer.clone());

    assert_eq!(handler.channel(), "logs");
    handler.on_message(r#"{"log": "ffmpeg: frame=120 fps=30"}"#).await;
    handler.on_message("not json").await;

    assert_eq!(buffer.snapshot(), vec!["ffmpeg: frame=120 fps=30"]);
}
