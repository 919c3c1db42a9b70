//! Shared fixtures for the integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;

use wifiscope::core::monitor::types::NetworkState;
use wifiscope::core::os::{OsError, WifiApi};

pub fn off_state() -> NetworkState {
    NetworkState::radio_off(Instant::now())
}

pub fn on_state(name: Option<&str>, tcp: bool, dns: bool) -> NetworkState {
    NetworkState::radio_on(name.map(str::to_string), tcp, dns, Instant::now())
}

/// A scripted OS layer: each call to `wifi_on` advances to the next
/// `(radio, ssid)` step, then the script's last step repeats forever. The
/// sampler reads the radio first, so one step corresponds to one sample.
pub struct FakeWifi {
    steps: Mutex<VecDeque<(bool, Option<String>)>>,
    current: Mutex<(bool, Option<String>)>,
}

impl FakeWifi {
    pub fn scripted(steps: &[(bool, Option<&str>)]) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(
                steps
                    .iter()
                    .map(|(on, ssid)| (*on, ssid.map(str::to_string)))
                    .collect(),
            ),
            current: Mutex::new((false, None)),
        })
    }
}

#[async_trait]
impl WifiApi for FakeWifi {
    async fn wifi_on(&self) -> Result<bool, OsError> {
        if let Some(next) = self.steps.lock().unwrap().pop_front() {
            *self.current.lock().unwrap() = next;
        }
        Ok(self.current.lock().unwrap().0)
    }

    async fn set_wifi(&self, _on: bool) -> Result<(), OsError> {
        Err(OsError::Unsupported("fake"))
    }

    async fn current_ssid(&self) -> Result<Option<String>, OsError> {
        Ok(self.current.lock().unwrap().1.clone())
    }

    async fn available_networks(&self) -> Result<Vec<String>, OsError> {
        Err(OsError::Unsupported("fake"))
    }

    async fn connect(&self, _ssid: &str, _password: Option<&str>) -> Result<(), OsError> {
        Err(OsError::Unsupported("fake"))
    }

    async fn disconnect(&self) -> Result<(), OsError> {
        Err(OsError::Unsupported("fake"))
    }
}

/// An OS layer whose radio probe always fails, for the error-collapse path.
pub struct BrokenWifi;

#[async_trait]
impl WifiApi for BrokenWifi {
    async fn wifi_on(&self) -> Result<bool, OsError> {
        Err(OsError::ProgramMissing {
            program: "nmcli".to_string(),
        })
    }

    async fn set_wifi(&self, _on: bool) -> Result<(), OsError> {
        Err(OsError::Unsupported("fake"))
    }

    async fn current_ssid(&self) -> Result<Option<String>, OsError> {
        Err(OsError::Unsupported("fake"))
    }

    async fn available_networks(&self) -> Result<Vec<String>, OsError> {
        Err(OsError::Unsupported("fake"))
    }

    async fn connect(&self, _ssid: &str, _password: Option<&str>) -> Result<(), OsError> {
        Err(OsError::Unsupported("fake"))
    }

    async fn disconnect(&self) -> Result<(), OsError> {
        Err(OsError::Unsupported("fake"))
    }
}

/// Writes an executable shell script into `dir` and returns its path.
#[cfg(unix)]
pub fn write_script(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}

/// Probe anchors that resolve instantly and never touch the network:
/// TCP against a loopback port, DNS against `localhost`.
pub fn local_probes(tcp_port: u16) -> wifiscope::config::ProbeConfig {
    wifiscope::config::ProbeConfig {
        tcp_host: "127.0.0.1".to_string(),
        tcp_port,
        tcp_timeout_ms: 500,
        dns_name: "localhost".to_string(),
        dns_timeout_ms: 500,
    }
}

/// A loopback port with nothing listening on it. Binding and dropping a
/// listener gives a port that was free a moment ago.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    port
}
