//! Application configuration.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::SkedaddleResult;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Defaults used when a CLI flag is not given.
    pub defaults: EncodeDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default transmission parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeDefaults {
    /// Message to encode.
    pub text: String,

    /// Words per minute.
    pub wpm: f64,

    /// Output format name ("avif" or "mp4").
    pub format: String,

    /// Beep tone frequency (Hz).
    pub tone_frequency_hz: u32,

    /// Pause appended after the message before a loop repeats (seconds).
    pub end_gap_secs: f64,

    /// Signal frame (shown during dits and dahs).
    pub frame_a: PathBuf,

    /// Pause frame (shown between signals).
    pub frame_b: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "skedaddle=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for EncodeDefaults {
    fn default() -> Self {
        Self {
            text: "MEOW".to_string(),
            wpm: 15.0,
            format: "avif".to_string(),
            tone_frequency_hz: 800,
            end_gap_secs: 1.0,
            frame_a: PathBuf::from("a.jpg"),
            frame_b: PathBuf::from("b.jpg"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`. A missing or unparsable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config");
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config");
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> SkedaddleResult<PathBuf> {
        let path = config_file_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> SkedaddleResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "Saved config");
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    config_file_path_in(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn config_file_path_in(xdg_config_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let base = match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(home.unwrap_or_else(|| OsString::from("/tmp"))).join(".config"),
    };
    base.join("skedaddle").join("config.json")
}
