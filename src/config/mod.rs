//! File configuration: compiled defaults, optionally overridden by
//! `~/.config/wifiscope/config.toml` (platform-equivalent config dir), merged
//! once at startup into an immutable value threaded through the program.

pub mod defaults;

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {detail}")]
    Read { path: PathBuf, detail: String },
    #[error("failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub probes: ProbeConfig,
    pub monitor: MonitorSettings,
    pub os: OsSettings,
}

/// Reference anchors and timeouts for the reachability probes. The TCP and
/// DNS anchors must be independent hosts so a DNS outage cannot masquerade
/// as a TCP failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    pub tcp_host: String,
    pub tcp_port: u16,
    pub tcp_timeout_ms: u64,
    pub dns_name: String,
    pub dns_timeout_ms: u64,
}

impl ProbeConfig {
    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_millis(self.tcp_timeout_ms)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonitorSettings {
    pub interval_seconds: f64,
    pub hook_timeout_seconds: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OsSettings {
    pub command_timeout_ms: u64,
}

impl OsSettings {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

impl Config {
    /// Loads the config file if present; a missing file means defaults, a
    /// malformed one is a configuration error surfaced before anything runs.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        let config: Config = toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor.interval_seconds <= 0.0 {
            return Err(ConfigError::Invalid(
                "monitor.interval_seconds must be positive".to_string(),
            ));
        }
        if self.monitor.hook_timeout_seconds <= 0.0 {
            return Err(ConfigError::Invalid(
                "monitor.hook_timeout_seconds must be positive".to_string(),
            ));
        }
        if self.probes.tcp_timeout_ms == 0 || self.probes.dns_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "probe timeouts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wifiscope").join("config.toml"))
    }
}
