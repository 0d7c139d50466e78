use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "linshot.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilenameFormat {
    LinshotNumbered,
    ScreenshotNumbered,
    #[default]
    LinshotTimestamped,
    ScreenshotTimestamped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutKey {
    None,
    #[default]
    PrintScreen,
    CtrlPrintScreen,
    ShiftPrintScreen,
    CtrlShiftS,
    CtrlAltS,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(default = "default_screenshot_path")]
    pub screenshot_path: PathBuf,
    #[serde(default)]
    pub filename_format: FilenameFormat,
    #[serde(default = "default_auto_number")]
    pub auto_number: u32,
    #[serde(default)]
    pub start_with_os: bool,
    #[serde(default)]
    pub shortcut_key: ShortcutKey,
    #[serde(default)]
    pub debug_logging: bool,
}

fn default_screenshot_path() -> PathBuf {
    dirs_next::picture_dir()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_auto_number() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screenshot_path: default_screenshot_path(),
            filename_format: FilenameFormat::default(),
            auto_number: default_auto_number(),
            start_with_os: false,
            shortcut_key: ShortcutKey::default(),
            debug_logging: false,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("linshot").join(CONFIG_FILE_NAME))
    }

    /// Load from the config file, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(settings) => {
                    debug!(path = %path.display(), "settings loaded");
                    settings
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "settings file is invalid, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("no config directory available")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config folder {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("serialize settings")?;
        fs::write(&path, raw).with_context(|| format!("write settings {}", path.display()))?;
        Ok(())
    }
}
