//! Dashboard configuration.
//!
//! Read once from `dashboard.yml` at start-up. A missing file means the
//! built-in defaults, which point at the production garden controller.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DashboardError, Result};
use crate::util::log::LogLevel;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.yml";
pub const DEFAULT_BASE_URL: &str = "https://service-smartgarden-api.s2.tebs.co.in";
pub const DEFAULT_DEVICE_ID: &str = "SmartGarden-82FA";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 20_000;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub device: DeviceConfig,
    pub polling: PollingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub base_url: String,
    pub device_id: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            device_id: DEFAULT_DEVICE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_ms: u64,
    /// No timeout when absent; a hung request then never resolves.
    pub request_timeout_ms: Option<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: None,
        }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: PathBuf,
    pub level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logs"),
            level: LogLevel::Info,
        }
    }
}

impl DashboardConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: DashboardConfig = serde_yaml::from_str(yaml)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn normalize(&mut self) {
        self.device.base_url = self.device.base_url.trim().trim_end_matches('/').to_string();
        self.device.device_id = self.device.device_id.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.device.base_url.is_empty() {
            return Err(DashboardError::Config("device.base_url must not be empty".into()));
        }
        if self.device.device_id.is_empty() {
            return Err(DashboardError::Config("device.device_id must not be empty".into()));
        }
        if self.polling.interval_ms == 0 {
            return Err(DashboardError::Config("polling.interval_ms must be greater than 0".into()));
        }
        Ok(())
    }

    pub fn docs_url(&self) -> String {
        format!("{}/docs", self.device.base_url)
    }
}
