//! Transition classification.
//!
//! `classify` is a pure function from a (previous, current) state pair to an
//! ordered list of events. It performs no I/O and reads no clocks; the
//! emission timestamp is supplied by the caller so the function stays
//! deterministic under test.

use crate::core::monitor::types::{Event, EventDetails, EventKind, NetworkState};

/// Diffs two successive samples into zero or more events.
///
/// The first sample is the baseline: with no previous state nothing is
/// emitted. Rules are evaluated in a fixed order and every rule that fires
/// contributes one event, so the returned list is totally ordered:
///
/// 1. radio came up            -> `wifi_on`
/// 2. radio went down          -> `wifi_off`
/// 3. associated to a network  -> `connected` (new SSID in details)
/// 4. left a network           -> `disconnected` (old SSID in details)
/// 5. internet became usable   -> `internet_on`
/// 6. internet became unusable -> `internet_off`
///
/// A roam fires rules 3 and 4 in the same tick, `connected` first. A radio
/// shutdown while associated fires 2, 4 and 6, in that order, because the
/// off-state invariants force the SSID absent and connectivity false.
pub fn classify(prev: Option<&NetworkState>, curr: &NetworkState, timestamp: &str) -> Vec<Event> {
    let Some(prev) = prev else {
        return Vec::new();
    };

    let mut events = Vec::new();
    let mut emit = |kind: EventKind, details: EventDetails| {
        events.push(Event {
            kind,
            timestamp: timestamp.to_string(),
            details,
            previous_state: prev.clone(),
            current_state: curr.clone(),
        });
    };

    if !prev.wifi_on && curr.wifi_on {
        emit(EventKind::WifiOn, EventDetails::default());
    }
    if prev.wifi_on && !curr.wifi_on {
        emit(EventKind::WifiOff, EventDetails::default());
    }

    // A present SSID that differs from the previous one is a join; a
    // previously present SSID that is gone or changed is a leave. A roam
    // fires both.
    if curr.network_name.is_some() && curr.network_name != prev.network_name {
        let name = curr.network_name.as_deref().unwrap_or_default();
        emit(EventKind::Connected, EventDetails::network(name));
    }
    if prev.network_name.is_some() && curr.network_name != prev.network_name {
        let name = prev.network_name.as_deref().unwrap_or_default();
        emit(EventKind::Disconnected, EventDetails::network(name));
    }

    if !prev.internet_connected && curr.internet_connected {
        emit(EventKind::InternetOn, EventDetails::default());
    }
    if prev.internet_connected && !curr.internet_connected {
        emit(EventKind::InternetOff, EventDetails::default());
    }

    events
}
