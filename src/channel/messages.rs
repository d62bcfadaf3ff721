//! Push message decoding

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Event type carrying `{running}` for the stream status
pub const STREAM_STATUS_EVENT: &str = "STREAM_STATUS";

const NEWS_EVENT_PREFIX: &str = "NEWS";

/// Message on the news channel: `{type, payload}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub payload: Value,
}

impl NewsEvent {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// `NEWS_ADDED`, `NEWS_UPDATED`, `NEWS_REMOVED`, ... all invalidate the queue
    pub fn is_news_change(&self) -> bool {
        self.event_type.starts_with(NEWS_EVENT_PREFIX)
    }

    pub fn stream_running(&self) -> Option<bool> {
        if self.event_type != STREAM_STATUS_EVENT {
            return None;
        }
        self.payload.get("running").and_then(Value::as_bool)
    }

    /// Id of the affected news item, when the payload names one
    pub fn news_id(&self) -> Option<i64> {
        self.payload.get("id").and_then(Value::as_i64)
    }
}

/// Message on the log channel: `{log}`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogEvent {
    pub log: String,
}

impl LogEvent {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
