// Compiled defaults. The probe anchors are deliberately on separate
// infrastructure: the TCP anchor is an IP literal so the reachability probe
// never depends on name resolution, and the DNS anchor is a
// high-availability name.
use crate::config::{Config, MonitorSettings, OsSettings, ProbeConfig};

pub const DEFAULT_INTERVAL_SECONDS: f64 = 5.0;
pub const DEFAULT_HOOK_TIMEOUT_SECONDS: f64 = 30.0;

pub const DEFAULT_TCP_HOST: &str = "1.1.1.1";
pub const DEFAULT_TCP_PORT: u16 = 443;
pub const DEFAULT_TCP_TIMEOUT_MS: u64 = 1500;

pub const DEFAULT_DNS_NAME: &str = "captive.apple.com";
pub const DEFAULT_DNS_TIMEOUT_MS: u64 = 1500;

pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 2000;

pub const DEFAULT_LOG_FILENAME: &str = "wifiscope-events.ndjson";

impl Default for Config {
    fn default() -> Self {
        Self {
            probes: ProbeConfig::default(),
            monitor: MonitorSettings::default(),
            os: OsSettings::default(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            tcp_host: DEFAULT_TCP_HOST.to_string(),
            tcp_port: DEFAULT_TCP_PORT,
            tcp_timeout_ms: DEFAULT_TCP_TIMEOUT_MS,
            dns_name: DEFAULT_DNS_NAME.to_string(),
            dns_timeout_ms: DEFAULT_DNS_TIMEOUT_MS,
        }
    }
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            hook_timeout_seconds: DEFAULT_HOOK_TIMEOUT_SECONDS,
        }
    }
}

impl Default for OsSettings {
    fn default() -> Self {
        Self {
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
        }
    }
}
