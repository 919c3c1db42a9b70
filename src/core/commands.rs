//! Implementations of the non-monitoring CLI verbs over the OS capability
//! layer.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ProbeConfig;
use crate::core::monitor::{MonitorError, StateSampler};
use crate::core::os::{OsError, WifiApi};

/// How long `connect` waits for the association to take before giving up.
const ASSOCIATION_WAIT: Duration = Duration::from_secs(10);
const ASSOCIATION_POLL: Duration = Duration::from_secs(1);

/// Composite report: one full sample, printed as aligned text or JSON.
pub async fn info(
    os: Arc<dyn WifiApi>,
    probes: ProbeConfig,
    json: bool,
) -> Result<(), MonitorError> {
    let sampler = StateSampler::new(os, probes);
    let state = sampler.sample().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("wifi:     {}", if state.wifi_on { "on" } else { "off" });
    println!(
        "network:  {}",
        state.network_name.as_deref().unwrap_or("(not associated)")
    );
    println!("tcp:      {}", verdict(state.tcp_working));
    println!("dns:      {}", verdict(state.dns_working));
    println!("internet: {}", verdict(state.internet_connected));
    Ok(())
}

pub async fn set_power(os: &dyn WifiApi, on: bool) -> Result<(), MonitorError> {
    let state = if on { "on" } else { "off" };
    if os.wifi_on().await? == on {
        println!("Wi-Fi is already {}", state);
        return Ok(());
    }
    os.set_wifi(on).await?;
    println!("Wi-Fi turned {}", state);
    Ok(())
}

pub async fn show_name(os: &dyn WifiApi) -> Result<(), MonitorError> {
    match os.current_ssid().await? {
        Some(name) => println!("{}", name),
        None => println!("(not associated)"),
    }
    Ok(())
}

pub async fn list_available(os: &dyn WifiApi) -> Result<(), MonitorError> {
    let networks = os.available_networks().await?;
    if networks.is_empty() {
        println!("No networks visible");
        return Ok(());
    }
    for name in networks {
        println!("{}", name);
    }
    Ok(())
}

/// Associates and then verifies the association took by re-reading the SSID;
/// some platform tools report success before the join completes.
pub async fn connect(
    os: &dyn WifiApi,
    ssid: &str,
    password: Option<&str>,
) -> Result<(), MonitorError> {
    os.connect(ssid, password).await?;

    let deadline = tokio::time::Instant::now() + ASSOCIATION_WAIT;
    loop {
        if os.current_ssid().await?.as_deref() == Some(ssid) {
            println!("Connected to {}", ssid);
            return Ok(());
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(OsError::AssociationFailed {
                ssid: ssid.to_string(),
            }
            .into());
        }
        tokio::time::sleep(ASSOCIATION_POLL).await;
    }
}

pub async fn disconnect(os: &dyn WifiApi) -> Result<(), MonitorError> {
    os.disconnect().await?;
    println!("Disconnected");
    Ok(())
}

fn verdict(value: bool) -> &'static str {
    if value {
        "working"
    } else {
        "not working"
    }
}
