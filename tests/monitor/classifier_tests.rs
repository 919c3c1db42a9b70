use wifiscope::core::monitor::classifier::classify;
use wifiscope::core::monitor::types::EventKind;

use crate::common::{off_state, on_state};

const TS: &str = "2024-01-15T12:34:56Z";

fn kinds(prev: Option<&wifiscope::core::monitor::types::NetworkState>,
         curr: &wifiscope::core::monitor::types::NetworkState) -> Vec<EventKind> {
    classify(prev, curr, TS).into_iter().map(|e| e.kind).collect()
}

#[test]
fn first_sample_is_a_silent_baseline() {
    for state in [
        off_state(),
        on_state(None, false, false),
        on_state(Some("Net"), true, true),
    ] {
        assert!(classify(None, &state, TS).is_empty());
    }
}

#[test]
fn identical_states_emit_nothing() {
    for state in [
        off_state(),
        on_state(None, false, false),
        on_state(Some("Net"), true, false),
        on_state(Some("Net"), true, true),
    ] {
        assert!(classify(Some(&state), &state, TS).is_empty());
    }
}

#[test]
fn radio_turn_on_from_cold() {
    let prev = off_state();
    let curr = on_state(None, false, false);
    assert_eq!(kinds(Some(&prev), &curr), vec![EventKind::WifiOn]);
}

#[test]
fn association_without_internet() {
    let prev = on_state(None, false, false);
    let curr = on_state(Some("CafeBleu_5G"), false, false);

    let events = classify(Some(&prev), &curr, TS);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Connected);
    assert_eq!(
        events[0].details.network_name.as_deref(),
        Some("CafeBleu_5G")
    );
}

#[test]
fn internet_comes_up() {
    let prev = on_state(Some("CafeBleu_5G"), false, false);
    let curr = on_state(Some("CafeBleu_5G"), true, true);
    assert_eq!(kinds(Some(&prev), &curr), vec![EventKind::InternetOn]);
}

#[test]
fn roam_emits_connected_then_disconnected() {
    let prev = on_state(Some("A"), true, true);
    let curr = on_state(Some("B"), true, true);

    let events = classify(Some(&prev), &curr, TS);
    assert_eq!(
        events.iter().map(|e| e.kind).collect::<Vec<_>>(),
        vec![EventKind::Connected, EventKind::Disconnected]
    );
    assert_eq!(events[0].details.network_name.as_deref(), Some("B"));
    assert_eq!(events[1].details.network_name.as_deref(), Some("A"));
}

#[test]
fn radio_off_while_connected_cascades() {
    let prev = on_state(Some("A"), true, true);
    let curr = off_state();

    let events = classify(Some(&prev), &curr, TS);
    assert_eq!(
        events.iter().map(|e| e.kind).collect::<Vec<_>>(),
        vec![
            EventKind::WifiOff,
            EventKind::Disconnected,
            EventKind::InternetOff
        ]
    );
    assert_eq!(events[1].details.network_name.as_deref(), Some("A"));
}

#[test]
fn internet_loss_without_roam() {
    let prev = on_state(Some("A"), true, true);
    let curr = on_state(Some("A"), true, false);
    assert_eq!(kinds(Some(&prev), &curr), vec![EventKind::InternetOff]);
}

#[test]
fn classification_is_deterministic() {
    let prev = on_state(Some("A"), true, true);
    let curr = on_state(Some("B"), false, false);

    let first = classify(Some(&prev), &curr, TS);
    let second = classify(Some(&prev), &curr, TS);
    assert_eq!(first, second);
}

#[test]
fn events_embed_both_state_snapshots() {
    let prev = off_state();
    let curr = on_state(None, false, false);

    let events = classify(Some(&prev), &curr, TS);
    assert_eq!(events[0].previous_state, prev);
    assert_eq!(events[0].current_state, curr);
    assert_eq!(events[0].timestamp, TS);
}

#[test]
fn event_json_matches_wire_schema() {
    let prev = on_state(Some("A"), true, true);
    let curr = on_state(Some("B"), true, true);

    for event in classify(Some(&prev), &curr, TS) {
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert!(object["type"].is_string());
        assert_eq!(object["timestamp"], TS);
        assert!(object["details"]["network_name"].is_string());
        for key in ["previous_state", "current_state"] {
            let state = object[key].as_object().unwrap();
            assert_eq!(state.len(), 5);
            assert!(state.contains_key("wifi_on"));
            assert!(state.contains_key("network_name"));
            assert!(state.contains_key("tcp_working"));
            assert!(state.contains_key("dns_working"));
            assert!(state.contains_key("internet_connected"));
        }
    }
}

#[test]
fn details_are_empty_for_non_association_events() {
    let prev = off_state();
    let curr = on_state(None, false, false);

    let event = &classify(Some(&prev), &curr, TS)[0];
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(event).unwrap()).unwrap();
    assert_eq!(value["type"], "wifi_on");
    assert_eq!(value["details"], serde_json::json!({}));
}
