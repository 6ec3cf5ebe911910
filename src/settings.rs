//! Application settings
//!
//! Stored in `~/.config/kontrol/settings.toml`. Everything here is about
//! how the driver runs; what the keyboard does lives in preset documents.

use std::path::{Path, PathBuf};
use std::time::Duration;

use kontrol_transport::protocol::bulk;
use serde::{Deserialize, Serialize};

use crate::presets::PRESET_EXTENSION;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Input polling period in milliseconds
    pub poll_interval_ms: u64,
    /// USB interface carrying the display bulk endpoint
    pub bulk_interface: u8,
    /// Directory searched for preset names given without a path
    pub preset_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            bulk_interface: bulk::DISPLAY_INTERFACE,
            preset_dir: None,
        }
    }
}

impl Settings {
    /// Get the default settings path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kontrol")
            .join("settings.toml")
    }

    /// Load settings from a file, or return defaults if it does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// Turn a preset argument into a path
    ///
    /// A bare name such as `lead` becomes `<preset_dir>/lead.toml`; anything
    /// with a directory component or an extension is used as given.
    pub fn resolve_preset(&self, preset: &Path) -> PathBuf {
        let bare = preset.components().count() == 1 && preset.extension().is_none();
        match &self.preset_dir {
            Some(dir) if bare => dir.join(preset).with_extension(PRESET_EXTENSION),
            _ => preset.to_path_buf(),
        }
    }
}
