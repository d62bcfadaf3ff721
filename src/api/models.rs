//! Wire models for the broadcast server REST and push surfaces

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// News item type shown as a scrolling ticker line
pub const NEWS_TYPE_TICKER: &str = "TICKER";
/// News item type shown as a breaking-news banner
pub const NEWS_TYPE_BREAKING: &str = "BREAKING";

/// News item as returned by `/api/news` and `/api/admin/news`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsItem {
    pub id: i64,
    pub title_tamil: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(rename = "type", default = "default_news_type")]
    pub news_type: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
}

fn default_news_type() -> String {
    NEWS_TYPE_TICKER.to_string()
}

fn default_category() -> String {
    "GENERAL".to_string()
}

fn default_source() -> String {
    "MANUAL".to_string()
}

impl NewsItem {
    pub fn is_breaking(&self) -> bool {
        self.news_type == NEWS_TYPE_BREAKING
    }

    pub fn is_ticker(&self) -> bool {
        self.news_type == NEWS_TYPE_TICKER
    }

    /// Drafts are items created inactive and awaiting approval
    pub fn is_draft(&self) -> bool {
        !self.is_active
    }

    /// Parse `created_at`, accepting both RFC 3339 and naive server timestamps (taken as UTC)
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

/// Payload for `POST /api/news`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewsCreate {
    pub title_tamil: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_english: Option<String>,
    #[serde(rename = "type", default = "default_news_type")]
    pub news_type: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

fn default_active() -> bool {
    true
}

impl NewsCreate {
    pub fn new(title_tamil: impl Into<String>) -> Self {
        Self {
            title_tamil: title_tamil.into(),
            title_english: None,
            news_type: default_news_type(),
            category: default_category(),
            location: None,
            is_active: true,
            priority: 0,
            source: default_source(),
            source_url: None,
            external_id: None,
            media_url: None,
        }
    }
}

/// Partial update for `PUT /api/news/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NewsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_tamil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_english: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub news_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

/// External source kind for `/api/news/fetch-external`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    #[default]
    Rss,
    Scraper,
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Rss => write!(f, "RSS"),
            SourceType::Scraper => write!(f, "SCRAPER"),
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RSS" => Ok(SourceType::Rss),
            "SCRAPER" => Ok(SourceType::Scraper),
            other => Err(format!("unknown source type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExternalFetchRequest {
    pub url: String,
    pub source_type: SourceType,
}

/// Preview item returned by an external fetch
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExternalItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExternalFetchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub items: Vec<ExternalItem>,
}

/// RSS or scraper source managed through `/api/feeds`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Feed {
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub source_type: SourceType,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeedCreate {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub source_type: SourceType,
}

/// Response of `POST /api/upload`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Entry of the media gallery
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MediaFile {
    pub name: String,
    pub url: String,
}

/// Overlay update; only present fields are changed on the server
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OverlayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_overlays: Option<bool>,
}

/// Overlay state from `GET /overlay/data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OverlayData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub webview_url: Option<String>,
    #[serde(default)]
    pub hide_overlays: Option<bool>,
    #[serde(default)]
    pub stream_key: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for `POST /api/stream/start`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StreamStartRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtmp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_rtmp_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StreamStatus {
    #[serde(default)]
    pub running: bool,
}

/// Generic `{status, ...}` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Overlay layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    Full,
    LBar,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::Full => LayoutMode::LBar,
            LayoutMode::LBar => LayoutMode::Full,
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutMode::Full => write!(f, "FULL"),
            LayoutMode::LBar => write!(f, "L_BAR"),
        }
    }
}

impl std::str::FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "FULL" => Ok(LayoutMode::Full),
            "L_BAR" | "LBAR" => Ok(LayoutMode::LBar),
            other => Err(format!("unknown layout mode '{}'", other)),
        }
    }
}

/// Overlay branding and layout from `GET /api/config`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub brand_color_primary: String,
    pub brand_color_secondary: String,
    pub brand_color_dark: String,
    pub logo_url: String,
    pub ticker_speed: u32,
    pub default_headline: String,
    pub ticker_label: String,
    pub breaking_label: String,
    pub live_label: String,
    #[serde(default)]
    pub layout_mode: LayoutMode,
    pub lbar_position: String,
    pub lbar_width: u32,
    pub lbar_bg_color: String,
    #[serde(default)]
    pub lbar_bg_image: String,
    pub lbar_content_type: String,
    #[serde(default)]
    pub lbar_content_data: String,
}

/// Partial update for `POST /api/config`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color_primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color_dark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker_speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaking_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbar_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbar_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbar_bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbar_bg_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbar_content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lbar_content_data: Option<String>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ConfigUpdate::default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterConfig {
    pub filters: Vec<String>,
}

/// Advertising campaign
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default = "default_campaign_priority")]
    pub priority: i32,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_campaign_priority() -> i32 {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CampaignCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default = "default_campaign_priority")]
    pub priority: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Ad creative attached to a campaign
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdItem {
    pub id: i64,
    pub campaign_id: i64,
    /// TICKER, L_BAR, FULLSCREEN or POPUP
    #[serde(rename = "type")]
    pub ad_type: String,
    pub content: String,
    #[serde(default = "default_ad_duration")]
    pub duration: u32,
    #[serde(default = "default_ad_interval")]
    pub interval: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_ad_duration() -> u32 {
    10
}

fn default_ad_interval() -> u32 {
    5
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AdItemCreate {
    pub campaign_id: i64,
    #[serde(rename = "type")]
    pub ad_type: String,
    pub content: String,
    #[serde(default = "default_ad_duration")]
    pub duration: u32,
    #[serde(default = "default_ad_interval")]
    pub interval: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Scheduled program slot
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Program {
    pub id: i64,
    pub title: String,
    pub video_path: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProgramCreate {
    pub title: String,
    pub video_path: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Audience voting configuration; keys the console does not know are carried through
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VotingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VotingStatus {
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VotingStats {
    #[serde(default)]
    pub total_votes: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
