//! State sampling: composes the OS radio/SSID probes with the network
//! reachability probes into one `NetworkState` per tick.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ProbeConfig;
use crate::core::monitor::probes;
use crate::core::monitor::types::NetworkState;
use crate::core::os::WifiApi;

pub struct StateSampler {
    os: Arc<dyn WifiApi>,
    probes: ProbeConfig,
}

impl StateSampler {
    pub fn new(os: Arc<dyn WifiApi>, probes: ProbeConfig) -> Self {
        Self { os, probes }
    }

    /// Assembles one observation. Field order matters for the state
    /// invariants: a powered-off radio short-circuits every other probe to
    /// its false/absent value.
    ///
    /// The TCP and DNS probes are independent and run concurrently; both
    /// rejoin before this returns, so the wall-clock cost of a sample is
    /// bounded by the larger of the two probe timeouts plus OS-query
    /// overhead.
    pub async fn sample(&self) -> NetworkState {
        let sampled_at = Instant::now();

        let wifi_on = self.os.wifi_on().await.unwrap_or(false);
        if !wifi_on {
            return NetworkState::radio_off(sampled_at);
        }

        let network_name = self.os.current_ssid().await.ok().flatten();

        let (tcp_working, dns_working) = tokio::join!(
            probes::tcp_reachable(
                &self.probes.tcp_host,
                self.probes.tcp_port,
                self.probes.tcp_timeout(),
            ),
            probes::dns_resolves(&self.probes.dns_name, self.probes.dns_timeout()),
        );

        NetworkState::radio_on(network_name, tcp_working, dns_working, sampled_at)
    }
}
