//! Length-prefixed string and binary fields.
//!
//! Both kinds share one framing: a two-byte big-endian length followed by
//! that many bytes. UTF-8 strings carry topic names, client identifiers and
//! usernames; binary fields carry the will payload and the password.

use heapless::Vec;

use super::error::{DecodingError, EncodingError};

/// Longest field the two-byte prefix can describe.
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

const PREFIX_LEN: usize = 2;

/// Append `s` as a length-prefixed UTF-8 string.
///
/// `None` and `Some("")` both encode as `00 00`.
///
/// # Errors
///
/// [`EncodingError::StringTooLong`] if the string exceeds 65,535 bytes or
/// `buf` lacks room for the prefix and content. `buf` is left untouched.
///
/// # Examples
///
/// ```rust
/// use heapless::Vec;
/// use mqtt_handshake::mqtt::string;
///
/// let mut buf: Vec<u8, 16> = Vec::new();
/// string::encode(Some("MQTT"), &mut buf).unwrap();
/// assert_eq!(&buf[..], &[0x00, 0x04, b'M', b'Q', b'T', b'T']);
/// ```
pub fn encode<const N: usize>(s: Option<&str>, buf: &mut Vec<u8, N>) -> Result<(), EncodingError> {
    encode_bytes(s.unwrap_or_default().as_bytes(), buf)
}

/// Append `data` as a length-prefixed binary field.
///
/// Same framing and failure rules as [`encode`].
pub fn encode_bytes<const N: usize>(data: &[u8], buf: &mut Vec<u8, N>) -> Result<(), EncodingError> {
    if data.len() > MAX_FIELD_LEN {
        return Err(EncodingError::StringTooLong);
    }
    if buf.capacity() - buf.len() < PREFIX_LEN + data.len() {
        return Err(EncodingError::StringTooLong);
    }

    let prefix = (data.len() as u16).to_be_bytes();
    // Capacity was checked above, neither call can fail.
    buf.extend_from_slice(&prefix)
        .map_err(|_| EncodingError::StringTooLong)?;
    buf.extend_from_slice(data)
        .map_err(|_| EncodingError::StringTooLong)?;
    Ok(())
}

/// Decode a length-prefixed UTF-8 string from the front of `bytes`.
///
/// Returns the borrowed string and the number of bytes consumed, prefix
/// included.
///
/// # Errors
///
/// * [`DecodingError::Truncated`] if fewer bytes remain than declared
/// * [`DecodingError::InvalidUtf8`] if the content is not UTF-8
pub fn decode(bytes: &[u8]) -> Result<(&str, usize), DecodingError> {
    let (data, consumed) = decode_bytes(bytes)?;
    let s = core::str::from_utf8(data).map_err(|_| DecodingError::InvalidUtf8)?;
    Ok((s, consumed))
}

/// Decode a length-prefixed binary field from the front of `bytes`.
pub fn decode_bytes(bytes: &[u8]) -> Result<(&[u8], usize), DecodingError> {
    let prefix = bytes.get(..PREFIX_LEN).ok_or(DecodingError::Truncated)?;
    let len = usize::from(u16::from_be_bytes([prefix[0], prefix[1]]));
    let data = bytes
        .get(PREFIX_LEN..PREFIX_LEN + len)
        .ok_or(DecodingError::Truncated)?;
    Ok((data, PREFIX_LEN + len))
}
