use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::render::DEFAULT_NEWLINE_INDICATOR;
use crate::session::mode::ModeKind;

const APP_DIR: &str = "typetest";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: ModeKind,
    #[serde(default = "default_language")]
    pub language: String,
    /// Seconds, time mode only.
    #[serde(default = "default_duration")]
    pub duration: u64,
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default)]
    pub punctuation: bool,
    #[serde(default)]
    pub numbers: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_newline_indicator")]
    pub newline_indicator: String,
}

fn default_language() -> String {
    "english".to_string()
}
fn default_duration() -> u64 {
    60
}
fn default_word_count() -> usize {
    50
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_tick_interval_ms() -> u64 {
    100
}
fn default_newline_indicator() -> String {
    DEFAULT_NEWLINE_INDICATOR.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeKind::default(),
            language: default_language(),
            duration: default_duration(),
            word_count: default_word_count(),
            punctuation: false,
            numbers: false,
            theme: default_theme(),
            tick_interval_ms: default_tick_interval_ms(),
            newline_indicator: default_newline_indicator(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::config_path())
    }

    /// Like [`Config::load_from`], but writes the defaults to `path` on first run so there
    /// is a file to edit. A failed write is logged and the defaults are still returned.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Config::default();
        match config.save_to(path) {
            Ok(()) => info!(path = %path.display(), "wrote default config"),
            Err(err) => warn!(path = %path.display(), %err, "could not write default config"),
        }
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}
