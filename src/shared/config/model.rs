use serde::Deserialize;
use std::time::Duration;

use crate::engine::worker::retry::RetryPolicy;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub gateway: GatewayConfig,
    pub maker: MakerConfig,
    pub poller: PollerConfig,
    #[serde(default)]
    pub broker: BrokerConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub base_url: String,
    pub host: String,
    /// Credential pool; sub-queries are spread over these round-robin.
    pub api_keys: Vec<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Client-side pacing per credential (0 disables it)
    #[serde(default)]
    pub requests_per_second: u32,
}

fn default_country() -> String {
    "ES".to_string()
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_locale() -> String {
    "es-ES".to_string()
}

fn default_page_size() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct MakerConfig {
    pub instances: usize,
    pub wait_ms: u64,
    pub max_errors: u32,
    pub cooldown_secs: u64,
}

impl MakerConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            wait: Duration::from_millis(self.wait_ms),
            max_errors: self.max_errors,
            cooldown: Duration::from_secs(self.cooldown_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    pub instances: usize,
    pub interval_ms: u64,
    pub max_errors: u32,
    pub cooldown_secs: u64,
}

impl PollerConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            wait: Duration::from_millis(self.interval_ms),
            max_errors: self.max_errors,
            cooldown: Duration::from_secs(self.cooldown_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    pub queue_capacity: usize,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 4096,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TasksConfig {
    /// Dispatcher count; defaults to one per api key
    pub slots: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
}

impl Settings {
    pub fn task_slots(&self) -> usize {
        self.tasks
            .slots
            .unwrap_or(self.gateway.api_keys.len())
            .max(1)
    }
}

use std::env;

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("FARE_SCOUT_CONFIG").unwrap_or_else(|_| "config".to_string());
    load_settings_from(&config_path)
}

pub fn load_settings_from(config_path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(config_path))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
