use anyhow::Result;
use directories::ProjectDirs;
use holiday_core::{AggregateOptions, CountRule, CountrySource, FetchStrategy, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Unset keeps the HTTP client's default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    Parallel,
    #[default]
    Batched,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub source: CountrySource,
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_batch_pause")]
    pub batch_pause_ms: u64,
    /// Year to hunt. Defaults to the current local year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source: CountrySource::default(),
            strategy: StrategyKind::default(),
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause(),
            year: None,
        }
    }
}

impl FetchConfig {
    pub fn fetch_strategy(&self) -> FetchStrategy {
        match self.strategy {
            StrategyKind::Parallel => FetchStrategy::Parallel,
            StrategyKind::Batched => FetchStrategy::Batched {
                size: self.batch_size.max(1),
                pause: Duration::from_millis(self.batch_pause_ms),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub count_rule: CountRule,
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Ticker characters scrolled per tick.
    #[serde(default = "default_ticker_speed")]
    pub ticker_speed: usize,
    /// Globe rotation per tick, in degrees of longitude.
    #[serde(default = "default_globe_speed")]
    pub globe_speed_deg: f64,
    #[serde(default = "default_honorable_mentions")]
    pub honorable_mentions: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            count_rule: CountRule::default(),
            upcoming_limit: default_upcoming_limit(),
            tick_ms: default_tick_ms(),
            ticker_speed: default_ticker_speed(),
            globe_speed_deg: default_globe_speed(),
            honorable_mentions: default_honorable_mentions(),
        }
    }
}

impl DisplayConfig {
    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            rule: self.count_rule,
            upcoming_limit: self.upcoming_limit,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    /// GeoJSON FeatureCollection with country outlines.
    #[serde(default)]
    pub geojson_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file. Defaults to `holiday-hunter.log` in the data directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_batch_size() -> usize {
    5
}

fn default_batch_pause() -> u64 {
    50
}

fn default_upcoming_limit() -> usize {
    5
}

fn default_tick_ms() -> u64 {
    100
}

fn default_ticker_speed() -> usize {
    1
}

fn default_globe_speed() -> f64 {
    2.0
}

fn default_honorable_mentions() -> usize {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::project_dirs().map(|p| p.config_dir().join("config.toml"))
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.logging.file {
            Some(file) => Ok(file.clone()),
            None => Self::project_dirs().map(|p| p.data_dir().join("holiday-hunter.log")),
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "holiday-hunter")
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))
    }
}
