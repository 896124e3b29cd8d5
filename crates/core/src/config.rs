//! Dashboard configuration, loaded from a JSON file with defaults for every field.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::range::TimeRange;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "STOCK_DASHBOARD_API_URL";

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin serving `/api/stocks/...`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. `None` leaves requests unbounded.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Search-as-you-type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a query is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Shorter input clears the result list instead of querying.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

/// Horizon slider bounds, in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    #[serde(default = "default_min_days")]
    pub min_days: u32,
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    #[serde(default = "default_days")]
    pub default_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default)]
    pub default_range: TimeRange,
}

/// Log level for hosts that install a logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_base_url() -> String { "http://127.0.0.1:5000".to_string() }
fn default_debounce_ms() -> u64 { 300 }
fn default_min_query_len() -> usize { 1 }
fn default_min_days() -> u32 { 1 }
fn default_max_days() -> u32 { 90 }
fn default_days() -> u32 { 30 }
fn default_log_level() -> String { "info".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            min_days: default_min_days(),
            max_days: default_max_days(),
            default_days: default_days(),
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_range: TimeRange::ThreeMonths,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// Parsed `level`, for handing to whatever logger the host installs.
    pub fn level_filter(&self) -> Result<log::LevelFilter, CoreError> {
        self.level
            .trim()
            .parse()
            .map_err(|_| CoreError::Config(format!("log.level '{}' is not a log level", self.level)))
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl PredictionConfig {
    /// Clamp a requested horizon into the slider's bounds.
    pub fn clamp_days(&self, days: u32) -> u32 {
        days.clamp(self.min_days, self.max_days)
    }
}

impl DashboardConfig {
    /// Parse a config file. Missing sections and fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&content)
            .map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the first config file found, else defaults, then apply
    /// the environment override.
    pub fn load() -> Self {
        let config_paths = ["dashboard.json", "config/dashboard.json"];

        let mut config = None;
        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(c) => {
                        log::info!("Loaded dashboard config from {path}");
                        config = Some(c);
                        break;
                    }
                    Err(e) => {
                        log::warn!("Failed to load dashboard config {path}: {e}");
                    }
                }
            }
        }

        let mut config = config.unwrap_or_else(|| {
            log::info!("Using default dashboard config");
            Self::default()
        });

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("{API_URL_ENV} overrides api.base_url");
                config.api.base_url = url.trim().to_string();
            }
        }
        config
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let p = &self.prediction;
        if p.min_days == 0 || p.min_days > p.max_days {
            return Err(CoreError::Config(format!(
                "prediction bounds must satisfy 1 <= min_days <= max_days (got {}..={})",
                p.min_days, p.max_days
            )));
        }
        if p.default_days < p.min_days || p.default_days > p.max_days {
            return Err(CoreError::Config(format!(
                "prediction.default_days {} outside {}..={}",
                p.default_days, p.min_days, p.max_days
            )));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(CoreError::Config("api.base_url must not be empty".into()));
        }
        self.log.level_filter()?;
        Ok(())
    }
}
