use mqtt_handshake::mqtt::{ConnAckResult, ConnectReturnCode, DecodingError, connack};

#[test]
fn test_accepted_without_session() {
    let result = connack::parse(&[0x20, 0x02, 0x00, 0x00]).unwrap();
    assert_eq!(result.return_code, ConnectReturnCode::Accepted);
    assert!(!result.session_present);
}

#[test]
fn test_identifier_rejected() {
    let result = connack::parse(&[0x20, 0x02, 0x00, 0x02]).unwrap();
    assert_eq!(result.return_code, ConnectReturnCode::IdentifierRejected);
    assert!(!result.is_accepted());
}

#[test]
fn test_three_bytes_is_invalid() {
    assert_eq!(
        connack::parse(&[0x20, 0x02, 0x00]),
        Err(DecodingError::InvalidResponse)
    );
}

#[test]
fn test_undefined_return_code_is_invalid() {
    assert_eq!(
        connack::parse(&[0x20, 0x02, 0x00, 0x06]),
        Err(DecodingError::InvalidResponse)
    );
    assert_eq!(
        connack::parse(&[0x20, 0x02, 0x00, 0xFF]),
        Err(DecodingError::InvalidResponse)
    );
}

#[test]
fn test_return_code_values() {
    let codes = [
        ConnectReturnCode::Accepted,
        ConnectReturnCode::UnacceptableProtocolVersion,
        ConnectReturnCode::IdentifierRejected,
        ConnectReturnCode::ServerUnavailable,
        ConnectReturnCode::BadUsernameOrPassword,
        ConnectReturnCode::NotAuthorized,
    ];
    for (value, code) in codes.into_iter().enumerate() {
        assert_eq!(code as usize, value);
        let result = ConnAckResult {
            return_code: code,
            session_present: false,
        };
        assert_eq!(connack::parse(&result.encode()), Ok(result));
    }
}

#[test]
fn test_low_nibble_of_header_is_not_checked() {
    // Only the packet type nibble identifies a CONNACK.
    assert!(connack::parse(&[0x21, 0x02, 0x00, 0x00]).is_ok());
    assert_eq!(
        connack::parse(&[0x10, 0x02, 0x00, 0x00]),
        Err(DecodingError::InvalidResponse)
    );
}
