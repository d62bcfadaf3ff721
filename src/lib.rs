//! Broadcast Console
//!
//! A headless admin console for a live-broadcast overlay and news system:
//! a typed client for the server's REST surface, reconnecting subscriptions to
//! its push channels, and the small amount of client-side state the admin view
//! keeps (news queue mirror, bounded log view, stream status, preferences).

pub mod api;
pub mod channel;
pub mod config;
pub mod console;
pub mod error;

pub use api::ApiClient;
pub use console::AdminConsole;
pub use error::{AppError, Result};
