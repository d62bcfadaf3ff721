//! Push channels - WebSocket subscriptions to `/ws/news` and `/ws/logs`

pub mod messages;
pub mod socket;

pub use messages::{LogEvent, NewsEvent, STREAM_STATUS_EVENT};
pub use socket::{PushHandler, ReconnectingSocket};
