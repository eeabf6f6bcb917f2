//! FILENAME: app/src/loader.rs
// PURPOSE: Loads the dataset once at startup.
// CONTEXT: Local file first, then the remote copy, then an empty store.

use crate::config::DashboardConfig;
use crate::{log_error, log_info, log_warn};
use engine::RecordStore;
use persistence::{load_csv, parse_csv, ParsedDataset, PersistenceError};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Where the loaded records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadSource {
    LocalFile,
    Remote,
    /// Both sources failed; the store is empty.
    Fallback,
}

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub store: RecordStore,
    pub source: LoadSource,
    pub skipped_rows: usize,
}

impl LoadedDataset {
    fn from_parsed(parsed: ParsedDataset, source: LoadSource) -> Self {
        LoadedDataset {
            store: RecordStore::new(parsed.records),
            source,
            skipped_rows: parsed.skipped_rows,
        }
    }

    fn fallback() -> Self {
        LoadedDataset {
            store: RecordStore::empty(),
            source: LoadSource::Fallback,
            skipped_rows: 0,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub fn load_local(path: &Path) -> Result<ParsedDataset, LoadError> {
    Ok(load_csv(path)?)
}

pub async fn fetch_remote(url: &str) -> Result<ParsedDataset, LoadError> {
    let response = reqwest::get(url).await?.error_for_status()?;
    let text = response.text().await?;
    Ok(parse_csv(&text)?)
}

/// Loads the dataset described by `config`. Never fails: when no source can
/// be read the dashboard starts with an empty store.
pub async fn load_dataset(config: &DashboardConfig) -> LoadedDataset {
    match load_local(&config.data_path) {
        Ok(parsed) => {
            log_info!(
                "DATA",
                "loaded {} records from {:?} (skipped {})",
                parsed.records.len(),
                config.data_path,
                parsed.skipped_rows
            );
            return LoadedDataset::from_parsed(parsed, LoadSource::LocalFile);
        }
        Err(e) => log_warn!("DATA", "local dataset {:?} unavailable: {}", config.data_path, e),
    }

    if let Some(url) = &config.data_url {
        match fetch_remote(url).await {
            Ok(parsed) => {
                log_info!(
                    "DATA",
                    "loaded {} records from {} (skipped {})",
                    parsed.records.len(),
                    url,
                    parsed.skipped_rows
                );
                return LoadedDataset::from_parsed(parsed, LoadSource::Remote);
            }
            Err(e) => log_error!("DATA", "remote dataset {} unavailable: {}", url, e),
        }
    }

    log_error!("DATA", "no dataset could be loaded, starting empty");
    LoadedDataset::fallback()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Name,Platform,Year,Genre,Global_Sales").unwrap();
        writeln!(file, "Wii Sports,Wii,2006,Sports,82.74").unwrap();
        writeln!(file, "Broken,Wii,,Sports,1.0").unwrap();

        let config = DashboardConfig {
            data_path: file.path().to_path_buf(),
            data_url: None,
            ..DashboardConfig::default()
        };
        let loaded = load_dataset(&config).await;

        assert_eq!(loaded.source, LoadSource::LocalFile);
        assert_eq!(loaded.store.len(), 1);
        assert_eq!(loaded.skipped_rows, 1);
    }

    #[tokio::test]
    async fn test_fallback_to_empty_store() {
        let config = DashboardConfig {
            data_path: "/missing/video_games_sales.csv".into(),
            data_url: None,
            ..DashboardConfig::default()
        };
        let loaded = load_dataset(&config).await;

        assert_eq!(loaded.source, LoadSource::Fallback);
        assert!(loaded.store.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back() {
        let config = DashboardConfig {
            data_path: "/missing/video_games_sales.csv".into(),
            data_url: Some("http://127.0.0.1:9/video_games_sales.csv".into()),
            ..DashboardConfig::default()
        };
        let loaded = load_dataset(&config).await;

        assert_eq!(loaded.source, LoadSource::Fallback);
    }
}
