//! Command line definitions

use std::path::PathBuf;

use broadcast_console::api::models::{LayoutMode, SourceType};
use broadcast_console::config::DEFAULT_CONFIG_PATH;
use clap::{Args, Parser, Subcommand};

/// Broadcast console CLI.
#[derive(Parser)]
#[command(name = "broadcast-console")]
#[command(about = "Admin console for the live-broadcast overlay and news system")]
#[command(version)]
pub struct Cli {
    /// Configuration file path (YAML or TOML)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Broadcast server base URL, overrides the configuration file
    #[arg(long, env = "BROADCAST_CONSOLE_URL", global = true)]
    pub base_url: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the effective settings to the configuration file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Follow news, logs and stream status live
    Watch,

    /// News queue and approval workflow
    News {
        #[command(subcommand)]
        action: NewsAction,
    },

    /// Stream control
    Stream {
        #[command(subcommand)]
        action: StreamAction,
    },

    /// Overlay text and main screen
    Overlay {
        #[command(subcommand)]
        action: OverlayAction,
    },

    /// Upload a media file
    Upload {
        /// File to upload
        file: PathBuf,

        /// Also put the uploaded file on the main screen
        #[arg(long)]
        main_screen: bool,
    },

    /// List the media gallery
    Media,

    /// Overlay branding and layout
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Blocked words and symbols
    Filters {
        #[command(subcommand)]
        action: FiltersAction,
    },

    /// RSS and scraper sources
    Feeds {
        #[command(subcommand)]
        action: FeedsAction,
    },

    /// Advertising campaigns and items
    Ads {
        #[command(subcommand)]
        action: AdsAction,
    },

    /// Program schedule
    Programs {
        #[command(subcommand)]
        action: ProgramsAction,
    },

    /// Audience voting
    Voting {
        #[command(subcommand)]
        action: VotingAction,
    },
}

#[derive(Args, Clone)]
pub struct HeadlineArgs {
    /// Headline text
    pub title: String,

    /// TICKER, BREAKING, ...
    #[arg(long = "type", default_value = "TICKER")]
    pub news_type: String,

    #[arg(long, default_value = "GENERAL")]
    pub category: String,

    #[arg(long, default_value_t = 0)]
    pub priority: i32,

    /// Image or video shown with the item
    #[arg(long)]
    pub media_url: Option<String>,
}

#[derive(Subcommand)]
pub enum NewsAction {
    /// List the queue
    List,
    /// List drafts awaiting approval
    Pending,
    /// Publish a headline
    Add(HeadlineArgs),
    /// Create a draft for approval
    Draft(HeadlineArgs),
    /// Flip an item's active flag
    Toggle { id: i64 },
    Delete { id: i64 },
    Approve { id: i64 },
    Reject { id: i64 },
    /// Put an item on the main screen
    Show { id: i64 },
    /// Preview items from an external source
    Fetch {
        url: String,
        #[arg(long, default_value = "RSS")]
        source: SourceType,
    },
    /// Import one fetched item as a draft
    Import {
        url: String,
        #[arg(long, default_value = "RSS")]
        source: SourceType,
        /// Position of the item in the fetch result
        #[arg(long, default_value_t = 0)]
        index: usize,
        #[arg(long, default_value = "GENERAL")]
        category: String,
    },
}

#[derive(Subcommand)]
pub enum StreamAction {
    /// Start streaming with a key or an rtmp:// URL (defaults to the last used key)
    Start {
        target: Option<String>,
        /// Backup ingest URL
        #[arg(long)]
        backup: Option<String>,
    },
    Stop,
    Status,
}

#[derive(Subcommand)]
pub enum OverlayAction {
    /// Show the current overlay data
    Show,
    /// Update overlay fields
    Set {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        info: Option<String>,
        #[arg(long)]
        webview_url: Option<String>,
        #[arg(long)]
        hide: Option<bool>,
    },
    /// Point the main screen at a URL
    Screen { url: String },
    /// Hide all overlay graphics
    Hide,
    /// Bring overlay graphics back
    Unhide,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Set(ConfigSetArgs),
    /// Toggle between FULL and L_BAR layout
    Layout,
}

#[derive(Args, Default)]
pub struct ConfigSetArgs {
    #[arg(long)]
    pub primary_color: Option<String>,
    #[arg(long)]
    pub secondary_color: Option<String>,
    #[arg(long)]
    pub dark_color: Option<String>,
    #[arg(long)]
    pub logo_url: Option<String>,
    /// Ticker scroll time in seconds
    #[arg(long)]
    pub ticker_speed: Option<u32>,
    #[arg(long)]
    pub default_headline: Option<String>,
    #[arg(long)]
    pub ticker_label: Option<String>,
    #[arg(long)]
    pub breaking_label: Option<String>,
    #[arg(long)]
    pub live_label: Option<String>,
    /// FULL or L_BAR
    #[arg(long)]
    pub layout: Option<LayoutMode>,
    /// LEFT or RIGHT
    #[arg(long)]
    pub lbar_position: Option<String>,
    /// Percentage of the screen width
    #[arg(long)]
    pub lbar_width: Option<u32>,
    #[arg(long)]
    pub lbar_bg_color: Option<String>,
    #[arg(long)]
    pub lbar_bg_image: Option<String>,
    /// IMAGE, URL or HTML
    #[arg(long)]
    pub lbar_content_type: Option<String>,
    #[arg(long)]
    pub lbar_content_data: Option<String>,
}

#[derive(Subcommand)]
pub enum FiltersAction {
    Show,
    /// Replace the list with a comma-separated set of entries
    Set { list: String },
}

#[derive(Subcommand)]
pub enum FeedsAction {
    List,
    Add {
        name: String,
        url: String,
        #[arg(long, default_value = "RSS")]
        source: SourceType,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum AdsAction {
    Campaigns,
    AddCampaign {
        name: String,
        #[arg(long)]
        client: Option<String>,
        #[arg(long, default_value_t = 1)]
        priority: i32,
    },
    Items,
    AddItem {
        campaign_id: i64,
        content: String,
        /// TICKER, L_BAR, FULLSCREEN or POPUP
        #[arg(long = "type", default_value = "TICKER")]
        ad_type: String,
        #[arg(long, default_value_t = 10)]
        duration: u32,
        #[arg(long, default_value_t = 5)]
        interval: u32,
    },
    DeleteItem { id: i64 },
    /// Ads that should be playing now
    Active,
}

#[derive(Subcommand)]
pub enum ProgramsAction {
    List,
    Add {
        title: String,
        video_path: String,
        start_time: String,
        end_time: String,
    },
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum VotingAction {
    Config,
    Set {
        #[arg(long)]
        question: Option<String>,
        #[arg(long = "option")]
        options: Vec<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Status,
    Stats,
}
