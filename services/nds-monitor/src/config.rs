//! Configuration types for the NightDriver monitor

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auto_refresh: AutoRefreshConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub build: BuildInfo,
}

/// Where the NightDriver server lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Periodic canvas refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoRefreshConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_refresh_interval")]
    pub interval_seconds: u64,
}

impl Default for AutoRefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_refresh_interval(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_dashboard_port(),
        }
    }
}

/// Build metadata, stamped at compile time through `NDS_BUILD_VERSION`,
/// `NDS_BUILD_COMMIT` and `NDS_BUILD_DATE`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(default = "default_build_version")]
    pub build_version: String,
    #[serde(default = "default_build_commit")]
    pub build_commit: String,
    #[serde(default = "default_build_date")]
    pub build_date: String,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            build_version: default_build_version(),
            build_commit: default_build_commit(),
            build_date: default_build_date(),
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:7777/api".to_string()
}

fn default_request_timeout() -> u64 {
    4
}

fn default_refresh_interval() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_dashboard_port() -> u16 {
    7778
}

fn default_build_version() -> String {
    option_env!("NDS_BUILD_VERSION")
        .unwrap_or(env!("CARGO_PKG_VERSION"))
        .to_string()
}

fn default_build_commit() -> String {
    option_env!("NDS_BUILD_COMMIT").unwrap_or("unknown").to_string()
}

fn default_build_date() -> String {
    option_env!("NDS_BUILD_DATE").unwrap_or("unknown").to_string()
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::MonitorError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    if config.auto_refresh.interval_seconds == 0 {
        return Err(crate::MonitorError::Config(
            "auto_refresh.interval_seconds must be greater than zero".to_string(),
        ));
    }
    if config.server.request_timeout_seconds == 0
        || config.server.request_timeout_seconds >= config.auto_refresh.interval_seconds
    {
        return Err(crate::MonitorError::Config(format!(
            "server.request_timeout_seconds ({}) must be between 1 and auto_refresh.interval_seconds ({})",
            config.server.request_timeout_seconds, config.auto_refresh.interval_seconds
        )));
    }
    Ok(config)
}
