//! macOS implementation over `networksetup`, `ipconfig` and the legacy
//! `airport` scanner.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::core::os::runner::CommandRunner;
use crate::core::os::{OsError, WifiApi};

const AIRPORT_BIN: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

pub struct MacOs {
    runner: CommandRunner,
    iface: OnceCell<String>,
}

impl MacOs {
    pub fn new(command_timeout: Duration) -> Self {
        Self {
            runner: CommandRunner::new(command_timeout),
            iface: OnceCell::new(),
        }
    }

    /// The Wi-Fi device name (usually `en0`), resolved once from the
    /// hardware-port listing.
    async fn interface(&self) -> Result<&str, OsError> {
        self.iface
            .get_or_try_init(|| async {
                let listing = self
                    .runner
                    .run("networksetup", &["-listallhardwareports"])
                    .await?;
                parse_wifi_device(&listing).ok_or(OsError::NoWifiInterface)
            })
            .await
            .map(String::as_str)
    }
}

#[async_trait]
impl WifiApi for MacOs {
    async fn wifi_on(&self) -> Result<bool, OsError> {
        let iface = self.interface().await?;
        let output = self
            .runner
            .run("networksetup", &["-getairportpower", iface])
            .await?;
        // "Wi-Fi Power (en0): On"
        Ok(output.trim_end().ends_with("On"))
    }

    async fn set_wifi(&self, on: bool) -> Result<(), OsError> {
        let iface = self.interface().await?;
        let state = if on { "on" } else { "off" };
        self.runner
            .run("networksetup", &["-setairportpower", iface, state])
            .await?;
        Ok(())
    }

    async fn current_ssid(&self) -> Result<Option<String>, OsError> {
        let iface = self.interface().await?;
        let summary = self.runner.run("ipconfig", &["getsummary", iface]).await?;
        Ok(parse_ssid_from_summary(&summary))
    }

    async fn available_networks(&self) -> Result<Vec<String>, OsError> {
        let scan = self.runner.run(AIRPORT_BIN, &["-s"]).await?;
        Ok(parse_airport_scan(&scan))
    }

    async fn connect(&self, ssid: &str, password: Option<&str>) -> Result<(), OsError> {
        let iface = self.interface().await?;
        let mut args = vec!["-setairportnetwork", iface, ssid];
        if let Some(password) = password {
            args.push(password);
        }
        let output = self.runner.run("networksetup", &args).await?;
        // networksetup reports join failures on stdout with a zero exit.
        let trimmed = output.trim();
        if trimmed.contains("Failed") || trimmed.contains("Error") {
            return Err(OsError::CommandFailed {
                program: "networksetup".to_string(),
                detail: trimmed.to_string(),
            });
        }
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), OsError> {
        self.runner.run(AIRPORT_BIN, &["-z"]).await?;
        Ok(())
    }
}

fn parse_wifi_device(listing: &str) -> Option<String> {
    let mut lines = listing.lines();
    while let Some(line) = lines.next() {
        if line.starts_with("Hardware Port:")
            && (line.contains("Wi-Fi") || line.contains("AirPort"))
        {
            for follow in lines.by_ref() {
                if let Some(device) = follow.trim().strip_prefix("Device: ") {
                    return Some(device.trim().to_string());
                }
                if follow.trim().is_empty() {
                    break;
                }
            }
        }
    }
    None
}

fn parse_ssid_from_summary(summary: &str) -> Option<String> {
    summary.lines().find_map(|line| {
        let trimmed = line.trim();
        trimmed
            .strip_prefix("SSID : ")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

/// The scan output is a fixed-width table with SSIDs right-aligned in the
/// first column; the header locates the column edge.
fn parse_airport_scan(scan: &str) -> Vec<String> {
    let mut lines = scan.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let Some(ssid_end) = header.find("SSID").map(|idx| idx + "SSID".len()) else {
        return Vec::new();
    };

    let mut names = Vec::new();
    for row in lines {
        if row.len() < ssid_end {
            continue;
        }
        let name = row[..ssid_end].trim();
        if !name.is_empty() && !names.iter().any(|seen| seen == name) {
            names.push(name.to_string());
        }
    }
    names
}
