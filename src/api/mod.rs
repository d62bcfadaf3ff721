//! API module - REST client for the broadcast server, wire models and URL resolution

pub mod client;
pub mod layout;
pub mod media;
pub mod models;
pub mod news;
pub mod schedule;
pub mod stream;
pub mod url;

pub use client::{error_message, ApiClient};
pub use layout::{join_filter_list, parse_filter_list};
pub use url::EndpointResolver;
