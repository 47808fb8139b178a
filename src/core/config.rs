use crate::core::analytics::EntryCount;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    #[serde(default = "default_exchange_rate_url")]
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SheetsonProviderConfig {
    #[serde(default = "default_sheetson_url")]
    pub base_url: String,
    pub spreadsheet_id: String,
    pub api_key: String,
    #[serde(default = "default_daily_sheet")]
    pub daily_sheet: String,
    #[serde(default = "default_one_off_sheet")]
    pub one_off_sheet: String,
    #[serde(default = "default_row_limit")]
    pub row_limit: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchange_rate: ExchangeRateProviderConfig,
    pub sheetson: SheetsonProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub home_currency: String,
    #[serde(default)]
    pub entry_count: EntryCount,
    pub countries_path: Option<String>,
    pub providers: ProvidersConfig,
}

fn default_exchange_rate_url() -> String {
    "https://v6.exchangerate-api.com".to_string()
}

fn default_sheetson_url() -> String {
    "https://api.sheetson.com".to_string()
}

fn default_daily_sheet() -> String {
    "Daily".to_string()
}

fn default_one_off_sheet() -> String {
    "OneOff".to_string()
}

fn default_row_limit() -> u32 {
    100
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "tripspend", "tripspend")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
