//! Console settings and configuration management

use crate::error::{AppError, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable prefix for overrides, e.g. `BROADCAST_CONSOLE_SERVER__BASE_URL`
pub const ENV_PREFIX: &str = "BROADCAST_CONSOLE";

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/console.yaml";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub channels: ChannelConfig,
    pub stream: StreamConfig,
    pub console: ConsoleConfig,
    pub logging: LoggingConfig,
}

/// Broadcast server connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10000
}

/// Push channel configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChannelConfig {
    #[serde(default = "default_news_path")]
    pub news_path: String,
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_ms: u64,
}

fn default_news_path() -> String {
    "/ws/news".to_string()
}

fn default_logs_path() -> String {
    "/ws/logs".to_string()
}

fn default_reconnect_delay() -> u64 {
    3000
}

/// Stream control configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_recheck_delay")]
    pub recheck_delay_ms: u64,
    #[serde(default = "default_rtmp_prefix")]
    pub rtmp_prefix: String,
}

fn default_poll_interval() -> u64 {
    2000
}

fn default_recheck_delay() -> u64 {
    1000
}

fn default_rtmp_prefix() -> String {
    "rtmp://a.rtmp.youtube.com/live2/".to_string()
}

/// Console state configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleConfig {
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    /// Admin view lists drafts as well as live items
    #[serde(default = "default_true")]
    pub admin_view: bool,
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

fn default_log_capacity() -> usize {
    50
}

fn default_true() -> bool {
    true
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("./console-preferences.json")
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load settings from a YAML or TOML file (optional) plus environment overrides
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let format = if path.extension().map_or(false, |ext| ext == "yaml" || ext == "yml") {
            FileFormat::Yaml
        } else {
            FileFormat::Toml
        };

        let mut builder = Config::builder()
            .set_default("server.base_url", default_base_url())?
            .set_default("server.timeout_ms", default_timeout())?
            .set_default("channels.news_path", default_news_path())?
            .set_default("channels.logs_path", default_logs_path())?
            .set_default("channels.reconnect_delay_ms", default_reconnect_delay())?
            .set_default("stream.poll_interval_ms", default_poll_interval())?
            .set_default("stream.recheck_delay_ms", default_recheck_delay())?
            .set_default("stream.rtmp_prefix", default_rtmp_prefix())?
            .set_default("console.log_capacity", default_log_capacity() as u64)?
            .set_default("console.admin_view", true)?
            .set_default("console.preferences_path", "./console-preferences.json")?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        if path.exists() {
            builder = builder.add_source(File::from(path).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.server.base_url).map_err(|e| {
            AppError::Config(config::ConfigError::Message(format!(
                "Invalid server.base_url '{}': {}",
                self.server.base_url, e
            )))
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::Config(config::ConfigError::Message(format!(
                "server.base_url must be http or https, got '{}'",
                base.scheme()
            ))));
        }

        if self.channels.reconnect_delay_ms == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "channels.reconnect_delay_ms cannot be 0".to_string(),
            )));
        }

        if self.stream.poll_interval_ms == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "stream.poll_interval_ms cannot be 0".to_string(),
            )));
        }

        if self.console.log_capacity == 0 {
            return Err(AppError::Config(config::ConfigError::Message(
                "console.log_capacity cannot be 0".to_string(),
            )));
        }

        Ok(())
    }

    /// Write the settings out as YAML, e.g. to seed a config file
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self).map_err(|e| {
            AppError::Config(config::ConfigError::Message(format!(
                "Failed to serialize settings: {}",
                e
            )))
        })?;

        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.timeout_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.channels.reconnect_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.stream.poll_interval_ms)
    }

    pub fn recheck_delay(&self) -> Duration {
        Duration::from_millis(self.stream.recheck_delay_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                base_url: default_base_url(),
                timeout_ms: default_timeout(),
            },
            channels: ChannelConfig {
                news_path: default_news_path(),
                logs_path: default_logs_path(),
                reconnect_delay_ms: default_reconnect_delay(),
            },
            stream: StreamConfig {
                poll_interval_ms: default_poll_interval(),
                recheck_delay_ms: default_recheck_delay(),
                rtmp_prefix: default_rtmp_prefix(),
            },
            console: ConsoleConfig {
                log_capacity: default_log_capacity(),
                admin_view: true,
                preferences_path: default_preferences_path(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}
