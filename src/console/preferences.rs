//! Local console preferences (last stream key, layout mode)

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::models::LayoutMode;
use crate::error::Result;

/// Values persisted between console sessions
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PreferenceValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_key: Option<String>,
    #[serde(default)]
    pub layout_mode: LayoutMode,
}

/// JSON-file backed preferences. Every change rewrites the whole file.
pub struct Preferences {
    path: PathBuf,
    values: Mutex<PreferenceValues>,
}

impl Preferences {
    /// Load preferences; a missing or unreadable file yields defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<PreferenceValues>(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring corrupt preferences file");
                    PreferenceValues::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PreferenceValues::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read preferences");
                PreferenceValues::default()
            }
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> PreferenceValues {
        self.values.lock().clone()
    }

    pub fn stream_key(&self) -> Option<String> {
        self.values.lock().stream_key.clone()
    }

    pub fn set_stream_key(&self, key: &str) -> Result<()> {
        self.update(|values| values.stream_key = Some(key.to_string()))?;
        Ok(())
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.values.lock().layout_mode
    }

    pub fn set_layout_mode(&self, mode: LayoutMode) -> Result<()> {
        self.update(|values| values.layout_mode = mode)?;
        Ok(())
    }

    /// Apply a change and persist it. The lock is held through the write and
    /// the in-memory values change only once the file is written.
    fn update<F>(&self, change: F) -> Result<PreferenceValues>
    where
        F: FnOnce(&mut PreferenceValues),
    {
        let mut values = self.values.lock();
        let mut next = values.clone();
        change(&mut next);
        self.save(&next)?;
        *values = next.clone();
        Ok(next)
    }

    fn save(&self, values: &PreferenceValues) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(values)?)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), "Preferences saved");
        Ok(())
    }
}
