//! Error types for the CONNECT/CONNACK codec and the handshake client.

use core::fmt;

use serde::Serialize;

use crate::network;

/// Which caller-supplied connect parameter broke an MQTT precondition.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InvalidParameter {
    /// An empty client identifier was combined with `clean_session = false`.
    ClientId,
    /// A password was given without a username.
    Password,
    /// The last-will QoS was outside `0..=2`.
    WillQos,
}

/// Errors produced while encoding a packet.
///
/// Every variant is detected before the output buffer is modified.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EncodingError {
    /// The connect parameters violate a protocol rule and were never encoded.
    InvalidParameter(InvalidParameter),
    /// A Remaining Length above 268,435,455.
    ValueTooLarge,
    /// A string longer than 65,535 bytes, or one that does not fit the
    /// remaining buffer capacity.
    StringTooLong,
    /// The assembled packet does not fit the packet buffer.
    BufferFull,
}

/// Errors produced while decoding received bytes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum DecodingError {
    /// The bytes are not a well-formed CONNACK (or CONNECT) packet.
    InvalidResponse,
    /// Fewer bytes remain than a length prefix declared.
    Truncated,
    /// A Remaining Length did not terminate within four bytes or its input
    /// ended mid-sequence.
    Malformed,
    /// A string field did not hold valid UTF-8.
    InvalidUtf8,
}

/// Errors returned by the handshake client.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The CONNECT packet could not be built; nothing was sent.
    Encoding(EncodingError),
    /// The broker's reply was rejected.
    Decoding(DecodingError),
    /// The transport failed to deliver or receive bytes.
    Transport(network::error::Error),
}

impl From<InvalidParameter> for EncodingError {
    fn from(e: InvalidParameter) -> Self {
        EncodingError::InvalidParameter(e)
    }
}

impl From<EncodingError> for Error {
    fn from(e: EncodingError) -> Self {
        Error::Encoding(e)
    }
}

impl From<DecodingError> for Error {
    fn from(e: DecodingError) -> Self {
        Error::Decoding(e)
    }
}

impl From<network::error::Error> for Error {
    fn from(e: network::error::Error) -> Self {
        Error::Transport(e)
    }
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            InvalidParameter::ClientId => "empty client identifier requires a clean session",
            InvalidParameter::Password => "password requires a username",
            InvalidParameter::WillQos => "will QoS must be 0, 1 or 2",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::InvalidParameter(p) => write!(f, "invalid parameter: {p}"),
            EncodingError::ValueTooLarge => f.write_str("remaining length exceeds 268435455"),
            EncodingError::StringTooLong => f.write_str("string field does not fit"),
            EncodingError::BufferFull => f.write_str("packet buffer full"),
        }
    }
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DecodingError::InvalidResponse => "invalid response packet",
            DecodingError::Truncated => "field truncated",
            DecodingError::Malformed => "malformed remaining length",
            DecodingError::InvalidUtf8 => "string field is not valid UTF-8",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Encoding(e) => write!(f, "encoding failed: {e}"),
            Error::Decoding(e) => write!(f, "decoding failed: {e}"),
            Error::Transport(e) => write!(f, "transport failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidParameter {}

#[cfg(feature = "std")]
impl std::error::Error for EncodingError {}

#[cfg(feature = "std")]
impl std::error::Error for DecodingError {}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for InvalidParameter {
    fn format(&self, f: defmt::Formatter) {
        match self {
            InvalidParameter::ClientId => defmt::write!(f, "ClientId"),
            InvalidParameter::Password => defmt::write!(f, "Password"),
            InvalidParameter::WillQos => defmt::write!(f, "WillQos"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EncodingError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncodingError::InvalidParameter(p) => defmt::write!(f, "InvalidParameter({})", p),
            EncodingError::ValueTooLarge => defmt::write!(f, "ValueTooLarge"),
            EncodingError::StringTooLong => defmt::write!(f, "StringTooLong"),
            EncodingError::BufferFull => defmt::write!(f, "BufferFull"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DecodingError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DecodingError::InvalidResponse => defmt::write!(f, "InvalidResponse"),
            DecodingError::Truncated => defmt::write!(f, "Truncated"),
            DecodingError::Malformed => defmt::write!(f, "Malformed"),
            DecodingError::InvalidUtf8 => defmt::write!(f, "InvalidUtf8"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Encoding(e) => defmt::write!(f, "Encoding({})", e),
            Error::Decoding(e) => defmt::write!(f, "Decoding({})", e),
            Error::Transport(e) => defmt::write!(f, "Transport({})", e),
        }
    }
}
