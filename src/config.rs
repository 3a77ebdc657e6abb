use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Settings injected into the fetcher, the image resolver and the slide animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub image_base: String,
    pub api_key: Option<String>,
    /// Overrides the terminal width used for slide offsets.
    pub viewport_width: Option<u16>,
    pub slide_duration_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            api_key: None,
            viewport_width: None,
            slide_duration_ms: 1000,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Defaults, then the JSON config file, then environment variables.
    pub fn load() -> Result<Self, AppError> {
        let file_contents = match config_file_path() {
            Some(path) if path.exists() => Some(fs::read_to_string(&path)?),
            _ => None,
        };
        Self::from_sources(file_contents.as_deref(), |name| std::env::var(name).ok())
    }

    pub fn from_sources<F>(file_contents: Option<&str>, env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file_contents {
            Some(contents) => serde_json::from_str::<Config>(contents)
                .map_err(|e| AppError::Config(format!("invalid config file: {}", e)))?,
            None => Config::default(),
        };

        if let Some(key) = env("TMDB_API_KEY") {
            config.api_key = Some(key);
        }
        if let Some(base) = env("TMDB_API_BASE") {
            config.api_base = base;
        }
        if let Some(base) = env("TMDB_IMAGE_BASE") {
            config.image_base = base;
        }

        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config.image_base = config.image_base.trim_end_matches('/').to_string();
        config.api_key = config
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(config)
    }

    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is not set".to_string()))
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("now_playing_tui").join("config.json"))
}

pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("now_playing_tui").join("app.log"))
}
