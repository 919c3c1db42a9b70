use std::sync::Arc;
use std::time::Duration;

use wifiscope::core::monitor::probes::{dns_resolves, tcp_reachable};
use wifiscope::core::monitor::StateSampler;

use crate::common::{closed_port, local_probes, BrokenWifi, FakeWifi};

#[tokio::test]
async fn radio_off_short_circuits_the_network_probes() {
    let os = FakeWifi::scripted(&[(false, None)]);
    let sampler = StateSampler::new(os, local_probes(closed_port()));

    let state = sampler.sample().await;
    assert!(!state.wifi_on);
    assert!(state.network_name.is_none());
    assert!(!state.internet_connected);
}

#[tokio::test]
async fn radio_probe_error_is_treated_as_off() {
    let sampler = StateSampler::new(Arc::new(BrokenWifi), local_probes(closed_port()));

    let state = sampler.sample().await;
    assert!(!state.wifi_on);
    assert!(state.network_name.is_none());
}

#[tokio::test]
async fn reachable_anchors_derive_internet_connected() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();

    let os = FakeWifi::scripted(&[(true, Some("CafeBleu_5G"))]);
    let sampler = StateSampler::new(os, local_probes(port));

    let state = sampler.sample().await;
    assert!(state.wifi_on);
    assert_eq!(state.network_name.as_deref(), Some("CafeBleu_5G"));
    assert!(state.tcp_working);
    assert!(state.dns_working);
    assert!(state.internet_connected);
}

#[tokio::test]
async fn unreachable_tcp_anchor_fails_the_derivation() {
    let os = FakeWifi::scripted(&[(true, Some("CafeBleu_5G"))]);
    let sampler = StateSampler::new(os, local_probes(closed_port()));

    let state = sampler.sample().await;
    assert!(state.wifi_on);
    assert!(!state.tcp_working);
    assert!(state.dns_working);
    assert!(!state.internet_connected);
}

#[tokio::test]
async fn tcp_probe_collapses_refusal_to_false() {
    assert!(!tcp_reachable("127.0.0.1", closed_port(), Duration::from_millis(500)).await);
}

#[tokio::test]
async fn tcp_probe_connects_to_a_listening_socket() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    assert!(tcp_reachable("127.0.0.1", port, Duration::from_millis(500)).await);
}

#[tokio::test]
async fn dns_probe_resolves_localhost() {
    assert!(dns_resolves("localhost", Duration::from_millis(500)).await);
}

#[tokio::test]
async fn dns_probe_collapses_nxdomain_to_false() {
    assert!(!dns_resolves("does-not-exist.invalid", Duration::from_secs(2)).await);
}
