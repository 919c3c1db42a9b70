use crate::common::{off_state, on_state};

#[test]
fn internet_is_tcp_and_dns() {
    for (tcp, dns) in [(false, false), (true, false), (false, true), (true, true)] {
        let state = on_state(Some("Net"), tcp, dns);
        assert_eq!(state.internet_connected, tcp && dns);
    }
}

#[test]
fn radio_off_forces_everything_false() {
    let state = off_state();
    assert!(!state.wifi_on);
    assert!(state.network_name.is_none());
    assert!(!state.tcp_working);
    assert!(!state.dns_working);
    assert!(!state.internet_connected);
}

#[test]
fn state_serializes_to_wire_shape() {
    let state = on_state(Some("CafeBleu_5G"), true, false);
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();

    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 5, "sampled_at must not serialize");
    assert_eq!(object["wifi_on"], true);
    assert_eq!(object["network_name"], "CafeBleu_5G");
    assert_eq!(object["tcp_working"], true);
    assert_eq!(object["dns_working"], false);
    assert_eq!(object["internet_connected"], false);
}

#[test]
fn absent_network_name_serializes_as_null() {
    let state = on_state(None, false, false);
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
    assert!(value["network_name"].is_null());
}
