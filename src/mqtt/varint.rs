//! Remaining Length encoding.
//!
//! MQTT stores the size of everything after the fixed header as a
//! variable-length integer: seven data bits per byte, least significant
//! group first, with bit 7 set on every byte except the last.
//!
//! | Bytes | From        | To                               |
//! |-------|-------------|----------------------------------|
//! | 1     | 0           | 127 (`0x7F`)                     |
//! | 2     | 128         | 16,383 (`0xFF 0x7F`)             |
//! | 3     | 16,384      | 2,097,151 (`0xFF 0xFF 0x7F`)     |
//! | 4     | 2,097,152   | 268,435,455 (`0xFF 0xFF 0xFF 0x7F`) |

use heapless::Vec;

use super::error::{DecodingError, EncodingError};

/// Largest value representable in four bytes.
pub const MAX_REMAINING_LENGTH: u32 = 268_435_455;

/// Maximum number of bytes a Remaining Length occupies on the wire.
pub const MAX_ENCODED_LEN: usize = 4;

const CONTINUATION: u8 = 0x80;
const DATA_MASK: u8 = 0x7F;

/// Encode `value` as a Remaining Length.
///
/// # Errors
///
/// [`EncodingError::ValueTooLarge`] if `value` exceeds
/// [`MAX_REMAINING_LENGTH`].
///
/// # Examples
///
/// ```rust
/// use mqtt_handshake::mqtt::varint;
///
/// assert_eq!(&varint::encode(321).unwrap()[..], &[0xC1, 0x02]);
/// ```
pub fn encode(mut value: u32) -> Result<Vec<u8, MAX_ENCODED_LEN>, EncodingError> {
    if value > MAX_REMAINING_LENGTH {
        return Err(EncodingError::ValueTooLarge);
    }

    let mut out = Vec::new();
    loop {
        let mut byte = (value % 128) as u8;
        value /= 128;
        if value > 0 {
            byte |= CONTINUATION;
        }
        // At most four iterations for values within range.
        out.push(byte).map_err(|_| EncodingError::ValueTooLarge)?;
        if value == 0 {
            break;
        }
    }
    Ok(out)
}

/// Number of bytes [`encode`] produces for `value`.
pub fn encoded_len(value: u32) -> Result<usize, EncodingError> {
    match value {
        0..=127 => Ok(1),
        128..=16_383 => Ok(2),
        16_384..=2_097_151 => Ok(3),
        2_097_152..=MAX_REMAINING_LENGTH => Ok(4),
        _ => Err(EncodingError::ValueTooLarge),
    }
}

/// Decode a Remaining Length from the front of `bytes`.
///
/// Returns the value and the number of bytes it occupied.
///
/// # Errors
///
/// [`DecodingError::Malformed`] if four bytes all carry the continuation bit
/// or `bytes` ends before a terminating byte.
pub fn decode(bytes: &[u8]) -> Result<(u32, usize), DecodingError> {
    let mut value: u32 = 0;
    for i in 0..MAX_ENCODED_LEN {
        let byte = *bytes.get(i).ok_or(DecodingError::Malformed)?;
        value |= u32::from(byte & DATA_MASK) << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(DecodingError::Malformed)
}
