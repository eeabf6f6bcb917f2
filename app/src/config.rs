//! FILENAME: app/src/config.rs
// PURPOSE: Dashboard configuration loaded from a JSON file.
// CONTEXT: Every field has a default, so a partial file (or none at all) is valid.

use insight_engine::AggregateLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Public copy of the dataset, used when the local file is missing.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/rudyluis/DashboardJS/refs/heads/main/video_games_sales.csv";

pub const DEFAULT_DATA_PATH: &str = "video_games_sales.csv";

/// Environment variable that overrides `data_path`.
pub const DATA_PATH_ENV: &str = "DASHBOARD_DATA_PATH";

/// Longest chart label before truncation.
pub const DEFAULT_LABEL_MAX_CHARS: usize = 20;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardConfig {
    /// Local CSV dataset, tried first.
    pub data_path: PathBuf,
    /// Remote CSV dataset, tried when the local file cannot be read.
    pub data_url: Option<String>,
    /// Rows per table page.
    pub items_per_page: usize,
    pub limits: AggregateLimits,
    /// Chart labels are cut to this many characters.
    pub label_max_chars: usize,
    pub log_file: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            data_url: Some(DEFAULT_DATA_URL.to_string()),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            limits: AggregateLimits::default(),
            label_max_chars: DEFAULT_LABEL_MAX_CHARS,
            log_file: None,
        }
    }
}

impl DashboardConfig {
    /// Replaces `data_path` when `value` is present and non-empty.
    pub fn with_data_path_override(mut self, value: Option<String>) -> Self {
        if let Some(path) = value.filter(|p| !p.trim().is_empty()) {
            self.data_path = PathBuf::from(path);
        }
        self
    }

    pub fn apply_env_overrides(self) -> Self {
        self.with_data_path_override(std::env::var(DATA_PATH_ENV).ok())
    }
}

pub fn parse_config(text: &str) -> Result<DashboardConfig, ConfigError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_config(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}
