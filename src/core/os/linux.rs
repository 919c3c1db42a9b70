//! Linux implementation over NetworkManager's `nmcli`.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::os::runner::CommandRunner;
use crate::core::os::{OsError, WifiApi};

pub struct Linux {
    runner: CommandRunner,
}

impl Linux {
    pub fn new(command_timeout: Duration) -> Self {
        Self {
            runner: CommandRunner::new(command_timeout),
        }
    }

    async fn wifi_device(&self) -> Result<String, OsError> {
        let listing = self
            .runner
            .run("nmcli", &["-t", "-f", "device,type", "dev"])
            .await?;
        listing
            .lines()
            .find_map(|line| line.strip_suffix(":wifi").map(str::to_string))
            .ok_or(OsError::NoWifiInterface)
    }
}

#[async_trait]
impl WifiApi for Linux {
    async fn wifi_on(&self) -> Result<bool, OsError> {
        let output = self.runner.run("nmcli", &["radio", "wifi"]).await?;
        Ok(output.trim() == "enabled")
    }

    async fn set_wifi(&self, on: bool) -> Result<(), OsError> {
        let state = if on { "on" } else { "off" };
        self.runner.run("nmcli", &["radio", "wifi", state]).await?;
        Ok(())
    }

    async fn current_ssid(&self) -> Result<Option<String>, OsError> {
        let listing = self
            .runner
            .run("nmcli", &["-t", "-f", "active,ssid", "dev", "wifi"])
            .await?;
        Ok(listing.lines().find_map(|line| {
            line.strip_prefix("yes:")
                .map(unescape_nmcli)
                .filter(|ssid| !ssid.is_empty())
        }))
    }

    async fn available_networks(&self) -> Result<Vec<String>, OsError> {
        let listing = self
            .runner
            .run("nmcli", &["-t", "-f", "signal,ssid", "dev", "wifi", "list"])
            .await?;

        let mut scored: Vec<(u8, String)> = listing
            .lines()
            .filter_map(|line| {
                let (signal, ssid) = line.split_once(':')?;
                let signal: u8 = signal.parse().ok()?;
                let ssid = unescape_nmcli(ssid);
                (!ssid.is_empty()).then_some((signal, ssid))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let mut names = Vec::new();
        for (_, ssid) in scored {
            if !names.contains(&ssid) {
                names.push(ssid);
            }
        }
        Ok(names)
    }

    async fn connect(&self, ssid: &str, password: Option<&str>) -> Result<(), OsError> {
        let mut args = vec!["dev", "wifi", "connect", ssid];
        if let Some(password) = password {
            args.push("password");
            args.push(password);
        }
        self.runner.run("nmcli", &args).await?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), OsError> {
        let device = self.wifi_device().await?;
        self.runner
            .run("nmcli", &["dev", "disconnect", &device])
            .await?;
        Ok(())
    }
}

/// Terse nmcli output escapes `:` and `\` inside field values.
fn unescape_nmcli(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
