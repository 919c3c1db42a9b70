// Core types for connectivity event monitoring
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use crate::core::os::OsError;

/// One composite observation of the host's network connectivity.
///
/// A `NetworkState` is immutable once constructed. `internet_connected` is
/// derived inside the constructors as `tcp_working && dns_working`; no other
/// input contributes, and no code path mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkState {
    /// Radio is powered and usable
    pub wifi_on: bool,
    /// SSID of the associated network; `None` when the radio is off or
    /// the host is not associated
    pub network_name: Option<String>,
    /// The reference TCP endpoint accepted a connection within the probe timeout
    pub tcp_working: bool,
    /// The reference hostname resolved within the probe timeout
    pub dns_working: bool,
    /// Derived: `tcp_working && dns_working`
    pub internet_connected: bool,
    /// Monotonic timestamp of sample start; never serialized
    #[serde(skip_serializing)]
    pub sampled_at: Instant,
}

impl NetworkState {
    /// State observed while the radio is off. All connectivity fields are
    /// false and the SSID is absent, per the state invariants.
    pub fn radio_off(sampled_at: Instant) -> Self {
        Self {
            wifi_on: false,
            network_name: None,
            tcp_working: false,
            dns_working: false,
            internet_connected: false,
            sampled_at,
        }
    }

    /// State observed while the radio is on.
    pub fn radio_on(
        network_name: Option<String>,
        tcp_working: bool,
        dns_working: bool,
        sampled_at: Instant,
    ) -> Self {
        Self {
            wifi_on: true,
            network_name,
            tcp_working,
            dns_working,
            internet_connected: tcp_working && dns_working,
            sampled_at,
        }
    }
}

/// Transition taxonomy. Serialized names are the wire-format `type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    WifiOn,
    WifiOff,
    Connected,
    Disconnected,
    InternetOn,
    InternetOff,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::WifiOn => "wifi_on",
            EventKind::WifiOff => "wifi_off",
            EventKind::Connected => "connected",
            EventKind::Disconnected => "disconnected",
            EventKind::InternetOn => "internet_on",
            EventKind::InternetOff => "internet_off",
        };
        f.write_str(name)
    }
}

/// Type-specific event payload. Carries the network name for
/// `connected`/`disconnected` and serializes as `{}` otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_name: Option<String>,
}

impl EventDetails {
    pub fn network(name: &str) -> Self {
        Self {
            network_name: Some(name.to_string()),
        }
    }
}

/// A detected connectivity transition, ready for sink fan-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Wall-clock ISO-8601 UTC, recorded at emission
    pub timestamp: String,
    pub details: EventDetails,
    pub previous_state: NetworkState,
    pub current_state: NetworkState,
}

/// Event-logger configuration, assembled once by the CLI layer and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub interval_seconds: f64,
    pub log_file_path: Option<PathBuf>,
    pub hook_path: Option<PathBuf>,
    pub emit_to_stdout: bool,
    pub verbose: bool,
    pub hook_timeout_seconds: f64,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: crate::config::defaults::DEFAULT_INTERVAL_SECONDS,
            log_file_path: None,
            hook_path: None,
            emit_to_stdout: true,
            verbose: false,
            hook_timeout_seconds: crate::config::defaults::DEFAULT_HOOK_TIMEOUT_SECONDS,
        }
    }
}

/// Monitoring errors that cross the orchestrator boundary. Probe and sink
/// failures are handled below this level and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Os(#[from] OsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wall-clock UTC timestamp in the wire format, e.g. `2024-01-15T12:34:56Z`.
pub fn utc_timestamp() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Local-timezone RFC3339 timestamp used by diagnostic logging.
pub fn local_timestamp() -> String {
    chrono::Local::now().to_rfc3339()
}
