//! CONNACK packet parsing.
//!
//! A CONNACK is always exactly four bytes:
//!
//! ```text
//! [0x20] [0x02] [ack flags] [return code]
//! ```
//!
//! Only bit 0 of the acknowledge flags (session present) is defined. Parsing
//! is strict: a reserved bit or an unknown return code rejects the whole
//! packet rather than being tolerated.

use serde::Serialize;

use super::error::DecodingError;

/// Fixed header byte 0 of a CONNACK packet.
pub const CONNACK: u8 = 0x20;
/// Total size of a CONNACK packet.
pub const CONNACK_LEN: usize = 4;

const PACKET_TYPE_CONNACK: u8 = 2;
const REMAINING_LEN: u8 = 2;
const SESSION_PRESENT: u8 = 0x01;

/// The broker's verdict on a CONNECT.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectReturnCode {
    /// 0: connection accepted.
    Accepted = 0,
    /// 1: the broker does not support the requested protocol level.
    UnacceptableProtocolVersion = 1,
    /// 2: the client identifier is well-formed UTF-8 but not allowed.
    IdentifierRejected = 2,
    /// 3: the MQTT service is unavailable.
    ServerUnavailable = 3,
    /// 4: the username or password is malformed or wrong.
    BadUsernameOrPassword = 4,
    /// 5: the client is not authorized to connect.
    NotAuthorized = 5,
}

impl TryFrom<u8> for ConnectReturnCode {
    type Error = DecodingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ConnectReturnCode::Accepted),
            1 => Ok(ConnectReturnCode::UnacceptableProtocolVersion),
            2 => Ok(ConnectReturnCode::IdentifierRejected),
            3 => Ok(ConnectReturnCode::ServerUnavailable),
            4 => Ok(ConnectReturnCode::BadUsernameOrPassword),
            5 => Ok(ConnectReturnCode::NotAuthorized),
            _ => Err(DecodingError::InvalidResponse),
        }
    }
}

/// A decoded CONNACK.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnAckResult {
    /// The broker's return code.
    pub return_code: ConnectReturnCode,
    /// The broker resumed a stored session. Only meaningful when the
    /// connection was accepted.
    pub session_present: bool,
}

impl ConnAckResult {
    /// Whether the broker accepted the connection.
    pub fn is_accepted(&self) -> bool {
        self.return_code == ConnectReturnCode::Accepted
    }

    /// Encode as the four CONNACK bytes a broker sends.
    pub fn encode(&self) -> [u8; CONNACK_LEN] {
        let flags = if self.session_present { SESSION_PRESENT } else { 0 };
        [CONNACK, REMAINING_LEN, flags, self.return_code as u8]
    }
}

/// Parse a received CONNACK.
///
/// # Errors
///
/// [`DecodingError::InvalidResponse`] if `bytes` is not exactly four bytes,
/// is not a CONNACK, declares a remaining length other than 2, sets a
/// reserved acknowledge flag, or carries a return code above 5.
///
/// # Examples
///
/// ```rust
/// use mqtt_handshake::mqtt::{connack, ConnectReturnCode};
///
/// let result = connack::parse(&[0x20, 0x02, 0x00, 0x02]).unwrap();
/// assert_eq!(result.return_code, ConnectReturnCode::IdentifierRejected);
/// ```
pub fn parse(bytes: &[u8]) -> Result<ConnAckResult, DecodingError> {
    let &[header, remaining_len, flags, code] = bytes else {
        return Err(DecodingError::InvalidResponse);
    };
    if header >> 4 != PACKET_TYPE_CONNACK {
        return Err(DecodingError::InvalidResponse);
    }
    if remaining_len != REMAINING_LEN {
        return Err(DecodingError::InvalidResponse);
    }
    if flags & !SESSION_PRESENT != 0 {
        return Err(DecodingError::InvalidResponse);
    }
    let return_code = ConnectReturnCode::try_from(code)?;

    Ok(ConnAckResult {
        return_code,
        session_present: flags & SESSION_PRESENT != 0,
    })
}
