use mqtt_handshake::mqtt::{ConnAckResult, ConnectReturnCode, SessionState};

#[test]
fn test_never_connected_report() {
    let json: heapless::String<64> = serde_json_core::to_string(&SessionState::default()).unwrap();
    assert_eq!(json.as_str(), r#""NeverConnected""#);
}

#[test]
fn test_connack_result_report() {
    let result = ConnAckResult {
        return_code: ConnectReturnCode::BadUsernameOrPassword,
        session_present: false,
    };
    let mut buf = [0u8; 128];
    let len = serde_json_core::to_slice(&result, &mut buf).unwrap();
    assert_eq!(
        core::str::from_utf8(&buf[..len]).unwrap(),
        r#"{"return_code":"BadUsernameOrPassword","session_present":false}"#
    );
}
