use heapless::Vec;
use mqtt_handshake::mqtt::varint::{self, MAX_REMAINING_LENGTH};
use mqtt_handshake::mqtt::{EncodingError, string};
use rand::Rng;
use rand::distributions::Alphanumeric;

fn expected_len(value: u32) -> usize {
    match value {
        0..=127 => 1,
        128..=16_383 => 2,
        16_384..=2_097_151 => 3,
        _ => 4,
    }
}

#[test]
fn test_varint_random_round_trip() {
    let mut rng = rand::thread_rng();
    for _ in 0..10_000 {
        let value = rng.gen_range(0..=MAX_REMAINING_LENGTH);
        let encoded = varint::encode(value).unwrap();
        assert_eq!(encoded.len(), expected_len(value), "value {value}");
        assert_eq!(varint::decode(&encoded), Ok((value, encoded.len())));
    }
}

#[test]
fn test_varint_round_trip_around_boundaries() {
    for boundary in [0u32, 127, 128, 16_383, 16_384, 2_097_151, 2_097_152, MAX_REMAINING_LENGTH] {
        for value in boundary.saturating_sub(2)..=boundary.saturating_add(2).min(MAX_REMAINING_LENGTH) {
            let encoded = varint::encode(value).unwrap();
            assert_eq!(encoded.len(), expected_len(value));
            assert_eq!(varint::decode(&encoded), Ok((value, encoded.len())));
        }
    }
}

#[test]
fn test_varint_too_large() {
    assert_eq!(varint::encode(268_435_456), Err(EncodingError::ValueTooLarge));
    assert_eq!(varint::encode(u32::MAX), Err(EncodingError::ValueTooLarge));
}

#[test]
fn test_string_random_round_trip() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let len = rng.gen_range(0..=1000);
        let s: std::string::String = (&mut rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();

        let mut buf: Vec<u8, 1024> = Vec::new();
        string::encode(Some(s.as_str()), &mut buf).unwrap();
        assert_eq!(buf.len(), len + 2);
        assert_eq!(string::decode(&buf), Ok((s.as_str(), len + 2)));
    }
}

#[test]
fn test_string_multibyte_length_is_in_bytes() {
    let mut buf: Vec<u8, 16> = Vec::new();
    string::encode(Some("héllo"), &mut buf).unwrap();
    assert_eq!(&buf[..2], &[0x00, 0x06]);
    assert_eq!(string::decode(&buf), Ok(("héllo", 8)));
}

#[test]
fn test_string_empty_is_two_zero_bytes() {
    let mut buf: Vec<u8, 4> = Vec::new();
    string::encode(Some(""), &mut buf).unwrap();
    assert_eq!(&buf[..], &[0x00, 0x00]);
}

#[test]
fn test_string_length_limit() {
    let max = "a".repeat(65_535);
    let over = "a".repeat(65_536);

    let mut buf: Vec<u8, 65_540> = Vec::new();
    string::encode(Some(max.as_str()), &mut buf).unwrap();
    assert_eq!(&buf[..2], &[0xFF, 0xFF]);
    let (decoded, used) = string::decode(&buf).unwrap();
    assert_eq!(decoded.len(), 65_535);
    assert_eq!(used, 65_537);

    let mut buf: Vec<u8, 65_540> = Vec::new();
    assert_eq!(
        string::encode(Some(over.as_str()), &mut buf),
        Err(EncodingError::StringTooLong)
    );
    assert!(buf.is_empty());
}
