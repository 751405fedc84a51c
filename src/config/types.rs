use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub harvester: HarvesterConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub load: LoadStrategy,
}

/// When the model artifact is read from disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStrategy {
    /// Read once when the server starts; restart to pick up a new artifact.
    #[default]
    Startup,
    /// Open, read and close the artifact on every prediction.
    PerRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvesterConfig {
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    #[serde(default = "default_detail_url")]
    pub detail_url: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    #[serde(default = "default_detail_delay_ms")]
    pub detail_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
    #[serde(default = "default_listing_output")]
    pub listing_output: PathBuf,
    #[serde(default = "default_details_output")]
    pub details_output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_predictor_url")]
    pub predictor_url: String,
    #[serde(default = "default_collector_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_positive_class")]
    pub positive_class: i64,
}

impl HarvesterConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn detail_delay(&self) -> Duration {
        Duration::from_millis(self.detail_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl CollectorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            load: LoadStrategy::default(),
        }
    }
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            detail_url: default_detail_url(),
            max_pages: default_max_pages(),
            page_delay_ms: default_page_delay_ms(),
            detail_delay_ms: default_detail_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            progress_every: default_progress_every(),
            listing_output: default_listing_output(),
            details_output: default_details_output(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            predictor_url: default_predictor_url(),
            timeout_secs: default_collector_timeout_secs(),
            positive_class: default_positive_class(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_path() -> PathBuf {
    PathBuf::from("model.json")
}

fn default_listing_url() -> String {
    "https://steamspy.com/api.php".to_string()
}

fn default_detail_url() -> String {
    "https://steamspy.com/api.php".to_string()
}

fn default_max_pages() -> u32 {
    86
}

// SteamSpy allows one "all" request per minute.
fn default_page_delay_ms() -> u64 {
    60_000
}

fn default_detail_delay_ms() -> u64 {
    1_100
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_progress_every() -> usize {
    100
}

fn default_listing_output() -> PathBuf {
    PathBuf::from("steam.csv")
}

fn default_details_output() -> PathBuf {
    PathBuf::from("steamspy_appdetails.csv")
}

fn default_predictor_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_collector_timeout_secs() -> u64 {
    60
}

fn default_positive_class() -> i64 {
    1
}
