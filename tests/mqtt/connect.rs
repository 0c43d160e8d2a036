use mqtt_handshake::mqtt::{
    ConnectFlags, ConnectPacket, ConnectParameters, EncodingError, InvalidParameter, LastWill,
    QoS, WillFlags, connect,
};

#[test]
fn test_dev1_packet_layout() {
    let params = ConnectParameters {
        client_id: "dev1",
        clean_session: true,
        keep_alive_seconds: 60,
        username: None,
        password: None,
        will: None,
    };
    let packet = ConnectPacket::build(&params).unwrap();
    let bytes = packet.as_bytes();

    // Fixed header
    assert_eq!(bytes[0], 0x10);
    assert_eq!(bytes[1] as usize, bytes.len() - 2);
    // Variable header
    assert_eq!(&bytes[2..8], &[0x00, 0x04, b'M', b'Q', b'T', b'T']);
    assert_eq!(bytes[8], 0x04);
    assert_eq!(bytes[9], 0x02);
    assert_eq!(&bytes[10..12], &[0x00, 0x3C]);
    // Payload
    assert_eq!(&bytes[12..], &[0x00, 0x04, b'd', b'e', b'v', b'1']);
}

#[test]
fn test_empty_client_id_requires_clean_session() {
    let params = ConnectParameters {
        clean_session: false,
        ..ConnectParameters::new("")
    };
    assert_eq!(
        ConnectPacket::build(&params),
        Err(EncodingError::InvalidParameter(InvalidParameter::ClientId))
    );

    // Allowed with a clean session; the id encodes as a zero-length string.
    let packet = ConnectPacket::build(&ConnectParameters::new("")).unwrap();
    assert_eq!(&packet.as_bytes()[12..], &[0x00, 0x00]);
}

#[test]
fn test_password_requires_username() {
    let params = ConnectParameters {
        password: Some(b"secret"),
        ..ConnectParameters::new("dev1")
    };
    assert_eq!(
        ConnectPacket::build(&params),
        Err(EncodingError::InvalidParameter(InvalidParameter::Password))
    );
}

#[test]
fn test_reserved_will_qos_rejected() {
    let params = ConnectParameters {
        will: Some(LastWill {
            topic: "status",
            payload: b"offline",
            qos: 3,
            retain: false,
        }),
        ..ConnectParameters::new("dev1")
    };
    assert_eq!(
        ConnectPacket::build(&params),
        Err(EncodingError::InvalidParameter(InvalidParameter::WillQos))
    );
}

#[test]
fn test_all_fields_in_protocol_order() {
    let params = ConnectParameters {
        client_id: "c",
        clean_session: false,
        keep_alive_seconds: 0x0102,
        username: Some("u"),
        password: Some(&[0xFF, 0x00]),
        will: Some(LastWill {
            topic: "t",
            payload: &[0xDE, 0xAD],
            qos: 1,
            retain: true,
        }),
    };
    let packet = ConnectPacket::build(&params).unwrap();

    let expected_flags: u8 = 0x80 | 0x40 | 0x20 | (1 << 3) | 0x04;
    assert_eq!(
        packet.as_bytes(),
        &[
            0x10, 0x1B, // fixed header, RL = 27
            0x00, 0x04, b'M', b'Q', b'T', b'T', 0x04, expected_flags, 0x01, 0x02,
            0x00, 0x01, b'c', // client id
            0x00, 0x01, b't', // will topic
            0x00, 0x02, 0xDE, 0xAD, // will payload
            0x00, 0x01, b'u', // username
            0x00, 0x02, 0xFF, 0x00, // password
        ]
    );
    assert_eq!(connect::decode(packet.as_bytes()), Ok(params));
}

#[test]
fn test_username_without_password() {
    let params = ConnectParameters {
        username: Some("user"),
        ..ConnectParameters::new("dev1")
    };
    let packet = ConnectPacket::build(&params).unwrap();
    let bytes = packet.as_bytes();
    assert_eq!(bytes[9], 0x82);
    assert_eq!(&bytes[bytes.len() - 6..], &[0x00, 0x04, b'u', b's', b'e', b'r']);
}

#[test]
fn test_flags_round_trip_through_byte() {
    let flags = ConnectFlags {
        username: true,
        password: true,
        will: Some(WillFlags {
            qos: QoS::ExactlyOnce,
            retain: false,
        }),
        clean_session: false,
    };
    let byte = u8::from(flags);
    assert_eq!(byte, 0b1101_0100);
    assert_eq!(ConnectFlags::try_from(byte), Ok(flags));
}

#[test]
fn test_two_byte_remaining_length() {
    let topic = "x".repeat(200);
    let params = ConnectParameters {
        will: Some(LastWill {
            topic: &topic,
            payload: b"",
            qos: 0,
            retain: false,
        }),
        ..ConnectParameters::new("dev1")
    };
    let packet = ConnectPacket::build(&params).unwrap();
    let bytes = packet.as_bytes();

    // 10 (variable header) + 6 (id) + 202 (topic) + 2 (payload) = 220
    assert_eq!(&bytes[1..3], &[0xDC, 0x01]);
    assert_eq!(packet.len(), 1 + 2 + 220);
    assert_eq!(connect::decode(bytes).unwrap().will.unwrap().topic, topic);
}

#[test]
fn test_oversized_packet_rejected() {
    let payload = [0u8; 1100];
    let params = ConnectParameters {
        will: Some(LastWill {
            topic: "t",
            payload: &payload,
            qos: 0,
            retain: false,
        }),
        ..ConnectParameters::new("dev1")
    };
    assert_eq!(
        ConnectPacket::build(&params),
        Err(EncodingError::StringTooLong)
    );
}
