/*!
OS-specific Wi-Fi capability layer.

The monitor core and the CLI verbs consume one flat capability set,
`WifiApi`. The concrete implementation is a tagged variant (`HostOs`) chosen
exactly once at startup from compile-time OS detection; there is no runtime
re-detection and no object hierarchy behind it. Tests inject fakes through
the same trait.
*/

pub mod linux;
pub mod macos;
pub mod runner;

use std::time::Duration;

use async_trait::async_trait;

pub use linux::Linux;
pub use macos::MacOs;
pub use runner::CommandRunner;

#[derive(Debug, thiserror::Error)]
pub enum OsError {
    #[error("unsupported platform: {0}")]
    Unsupported(&'static str),
    #[error("required tool {program} not found")]
    ProgramMissing { program: String },
    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("{program} failed: {detail}")]
    CommandFailed { program: String, detail: String },
    #[error("no Wi-Fi interface found")]
    NoWifiInterface,
    #[error("association to {ssid} did not complete")]
    AssociationFailed { ssid: String },
}

/// The capability set the rest of the program is allowed to ask of the OS.
#[async_trait]
pub trait WifiApi: Send + Sync {
    /// Radio power state. Bounded by the command timeout.
    async fn wifi_on(&self) -> Result<bool, OsError>;
    /// Power the radio on or off.
    async fn set_wifi(&self, on: bool) -> Result<(), OsError>;
    /// SSID of the associated network; `None` when unassociated.
    async fn current_ssid(&self) -> Result<Option<String>, OsError>;
    /// Visible networks, strongest first, deduplicated by SSID.
    async fn available_networks(&self) -> Result<Vec<String>, OsError>;
    /// Associate to `ssid`, optionally with a password.
    async fn connect(&self, ssid: &str, password: Option<&str>) -> Result<(), OsError>;
    /// Drop the association without powering the radio off.
    async fn disconnect(&self) -> Result<(), OsError>;
}

/// The host platform, detected once at startup.
pub enum HostOs {
    MacOs(MacOs),
    Linux(Linux),
}

impl HostOs {
    pub fn detect(command_timeout: Duration) -> Result<Self, OsError> {
        #[cfg(target_os = "macos")]
        return Ok(HostOs::MacOs(MacOs::new(command_timeout)));
        #[cfg(target_os = "linux")]
        return Ok(HostOs::Linux(Linux::new(command_timeout)));
        #[allow(unreachable_code)]
        {
            let _ = command_timeout;
            Err(OsError::Unsupported(std::env::consts::OS))
        }
    }
}

#[async_trait]
impl WifiApi for HostOs {
    async fn wifi_on(&self) -> Result<bool, OsError> {
        match self {
            HostOs::MacOs(os) => os.wifi_on().await,
            HostOs::Linux(os) => os.wifi_on().await,
        }
    }

    async fn set_wifi(&self, on: bool) -> Result<(), OsError> {
        match self {
            HostOs::MacOs(os) => os.set_wifi(on).await,
            HostOs::Linux(os) => os.set_wifi(on).await,
        }
    }

    async fn current_ssid(&self) -> Result<Option<String>, OsError> {
        match self {
            HostOs::MacOs(os) => os.current_ssid().await,
            HostOs::Linux(os) => os.current_ssid().await,
        }
    }

    async fn available_networks(&self) -> Result<Vec<String>, OsError> {
        match self {
            HostOs::MacOs(os) => os.available_networks().await,
            HostOs::Linux(os) => os.available_networks().await,
        }
    }

    async fn connect(&self, ssid: &str, password: Option<&str>) -> Result<(), OsError> {
        match self {
            HostOs::MacOs(os) => os.connect(ssid, password).await,
            HostOs::Linux(os) => os.connect(ssid, password).await,
        }
    }

    async fn disconnect(&self) -> Result<(), OsError> {
        match self {
            HostOs::MacOs(os) => os.disconnect().await,
            HostOs::Linux(os) => os.disconnect().await,
        }
    }
}
