// Reachability probes. Each probe collapses every failure, including
// timeout, to `false` so the sampler is never derailed by a single check.
use std::time::Duration;

use tokio::net::{lookup_host, TcpStream};

/// Attempts a TCP connect to `host:port`, closing the socket immediately on
/// success. The reference host should be an IP literal so that a DNS outage
/// cannot masquerade as a TCP failure.
pub async fn tcp_reachable(host: &str, port: u16, timeout: Duration) -> bool {
    let addr = format!("{}:{}", host, port);
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(&addr)).await,
        Ok(Ok(_))
    )
}

/// Attempts to resolve `name` to at least one address.
pub async fn dns_resolves(name: &str, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, lookup_host((name, 0u16))).await {
        Ok(Ok(mut addrs)) => addrs.next().is_some(),
        _ => false,
    }
}
