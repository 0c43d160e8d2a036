//! CONNECT packet construction.
//!
//! A CONNECT packet is laid out as
//!
//! ```text
//! ┌──────────────┬─────────────────────────────────────┬──────────────────────────────┐
//! │ Fixed header │ Variable header                     │ Payload                      │
//! │ 0x10 │ RL    │ "MQTT" │ 0x04 │ flags │ keep-alive   │ id │ will │ user │ password │
//! └──────────────┴─────────────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! The Remaining Length (RL) is only known once the variable header and
//! payload exist, so [`ConnectPacket::build`] assembles those into a scratch
//! buffer first, measures it, and then writes fixed header and scratch into
//! the final packet.

use heapless::Vec;

use super::error::{DecodingError, EncodingError, InvalidParameter};
use super::{string, varint};

/// Fixed header byte 0 of a CONNECT packet (type 1, flags 0).
pub const CONNECT: u8 = 0x10;
/// Protocol name carried in the variable header.
pub const PROTOCOL_NAME: &str = "MQTT";
/// Protocol level for MQTT 3.1.1.
pub const PROTOCOL_LEVEL: u8 = 4;
/// Capacity of a [`ConnectPacket`] in bytes.
pub const MAX_PACKET_SIZE: usize = 1024;

const FLAG_USERNAME: u8 = 0x80;
const FLAG_PASSWORD: u8 = 0x40;
const FLAG_WILL_RETAIN: u8 = 0x20;
const FLAG_WILL_QOS_MASK: u8 = 0x18;
const FLAG_WILL_QOS_SHIFT: u8 = 3;
const FLAG_WILL: u8 = 0x04;
const FLAG_CLEAN_SESSION: u8 = 0x02;
const FLAG_RESERVED: u8 = 0x01;

/// Quality of Service levels for MQTT messages.
///
/// ```rust
/// use mqtt_handshake::mqtt::QoS;
///
/// assert_eq!(QoS::try_from(1), Ok(QoS::AtLeastOnce));
/// assert!(QoS::try_from(3).is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QoS {
    /// At most once delivery.
    AtMostOnce = 0,
    /// At least once delivery.
    AtLeastOnce = 1,
    /// Exactly once delivery.
    ExactlyOnce = 2,
}

impl TryFrom<u8> for QoS {
    type Error = InvalidParameter;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            _ => Err(InvalidParameter::WillQos),
        }
    }
}

/// Message the broker publishes on the client's behalf if it disconnects
/// without a DISCONNECT.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LastWill<'a> {
    /// Topic the will is published to.
    pub topic: &'a str,
    /// Arbitrary payload bytes.
    pub payload: &'a [u8],
    /// Requested QoS level. Only 0, 1 and 2 are accepted; 3 is reserved.
    pub qos: u8,
    /// Whether the broker retains the will message.
    pub retain: bool,
}

/// Everything a client supplies to open a session.
///
/// ```rust
/// use mqtt_handshake::mqtt::ConnectParameters;
///
/// let params = ConnectParameters {
///     username: Some("device"),
///     password: Some(b"secret"),
///     keep_alive_seconds: 60,
///     ..ConnectParameters::new("sensor-01")
/// };
/// assert!(params.clean_session);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectParameters<'a> {
    /// Client identifier. May only be empty when `clean_session` is set, in
    /// which case the broker assigns one.
    pub client_id: &'a str,
    /// Discard any session state the broker holds for this client.
    pub clean_session: bool,
    /// Keep-alive interval in seconds, 0 disables it.
    pub keep_alive_seconds: u16,
    /// Optional username.
    pub username: Option<&'a str>,
    /// Optional password. Requires `username`.
    pub password: Option<&'a [u8]>,
    /// Optional last will.
    pub will: Option<LastWill<'a>>,
}

impl<'a> ConnectParameters<'a> {
    /// Parameters for a clean session without keep-alive, credentials or will.
    pub fn new(client_id: &'a str) -> Self {
        Self {
            client_id,
            clean_session: true,
            keep_alive_seconds: 0,
            username: None,
            password: None,
            will: None,
        }
    }

    /// Check the MQTT preconditions and derive the flags byte contents.
    pub fn validate(&self) -> Result<ConnectFlags, InvalidParameter> {
        if self.client_id.is_empty() && !self.clean_session {
            return Err(InvalidParameter::ClientId);
        }
        if self.password.is_some() && self.username.is_none() {
            return Err(InvalidParameter::Password);
        }
        let will = match &self.will {
            Some(will) => Some(WillFlags {
                qos: QoS::try_from(will.qos)?,
                retain: will.retain,
            }),
            None => None,
        };

        Ok(ConnectFlags {
            username: self.username.is_some(),
            password: self.password.is_some(),
            will,
            clean_session: self.clean_session,
        })
    }
}

/// Will-related bits of the connect flags.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WillFlags {
    /// QoS of the will message.
    pub qos: QoS,
    /// Retain flag of the will message.
    pub retain: bool,
}

/// Typed view of the CONNECT flags byte.
///
/// Bit layout, most significant first: username, password, will retain,
/// will QoS (two bits), will, clean session, reserved.
///
/// ```rust
/// use mqtt_handshake::mqtt::{ConnectFlags, QoS, WillFlags};
///
/// let flags = ConnectFlags {
///     username: true,
///     password: false,
///     will: Some(WillFlags { qos: QoS::AtLeastOnce, retain: true }),
///     clean_session: true,
/// };
/// assert_eq!(u8::from(flags), 0b1010_1110);
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectFlags {
    /// A username follows in the payload.
    pub username: bool,
    /// A password follows in the payload.
    pub password: bool,
    /// A will topic and payload follow the client identifier.
    pub will: Option<WillFlags>,
    /// Start a clean session.
    pub clean_session: bool,
}

impl From<ConnectFlags> for u8 {
    fn from(flags: ConnectFlags) -> u8 {
        let mut byte = 0;
        if flags.username {
            byte |= FLAG_USERNAME;
        }
        if flags.password {
            byte |= FLAG_PASSWORD;
        }
        if let Some(will) = flags.will {
            byte |= FLAG_WILL;
            byte |= ((will.qos as u8) << FLAG_WILL_QOS_SHIFT) & FLAG_WILL_QOS_MASK;
            if will.retain {
                byte |= FLAG_WILL_RETAIN;
            }
        }
        if flags.clean_session {
            byte |= FLAG_CLEAN_SESSION;
        }
        byte
    }
}

impl TryFrom<u8> for ConnectFlags {
    type Error = DecodingError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        if byte & FLAG_RESERVED != 0 {
            return Err(DecodingError::InvalidResponse);
        }
        let username = byte & FLAG_USERNAME != 0;
        let password = byte & FLAG_PASSWORD != 0;
        if password && !username {
            return Err(DecodingError::InvalidResponse);
        }

        let qos_bits = (byte & FLAG_WILL_QOS_MASK) >> FLAG_WILL_QOS_SHIFT;
        let retain = byte & FLAG_WILL_RETAIN != 0;
        let will = if byte & FLAG_WILL != 0 {
            let qos = QoS::try_from(qos_bits).map_err(|_| DecodingError::InvalidResponse)?;
            Some(WillFlags { qos, retain })
        } else if qos_bits != 0 || retain {
            return Err(DecodingError::InvalidResponse);
        } else {
            None
        };

        Ok(ConnectFlags {
            username,
            password,
            will,
            clean_session: byte & FLAG_CLEAN_SESSION != 0,
        })
    }
}

/// An encoded CONNECT packet, ready to hand to a transport.
///
/// Each build owns its buffer; the bytes cannot be modified after
/// construction.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ConnectPacket {
    bytes: Vec<u8, MAX_PACKET_SIZE>,
}

impl ConnectPacket {
    /// Validate `params` and encode them as a CONNECT packet.
    ///
    /// # Errors
    ///
    /// * [`EncodingError::InvalidParameter`] when a protocol precondition is
    ///   violated; checked before anything is encoded
    /// * [`EncodingError::StringTooLong`] when a string or binary field does
    ///   not fit
    /// * [`EncodingError::BufferFull`] when the packet exceeds
    ///   [`MAX_PACKET_SIZE`]
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mqtt_handshake::mqtt::{ConnectPacket, ConnectParameters};
    ///
    /// let params = ConnectParameters {
    ///     keep_alive_seconds: 60,
    ///     ..ConnectParameters::new("dev1")
    /// };
    /// let packet = ConnectPacket::build(&params).unwrap();
    /// assert_eq!(packet.as_bytes()[0], 0x10);
    /// ```
    pub fn build(params: &ConnectParameters<'_>) -> Result<Self, EncodingError> {
        let flags = params.validate()?;

        // --- Variable Header + Payload (scratch) ---
        let mut body: Vec<u8, MAX_PACKET_SIZE> = Vec::new();
        string::encode(Some(PROTOCOL_NAME), &mut body)?;
        body.push(PROTOCOL_LEVEL).map_err(|_| EncodingError::BufferFull)?;
        body.push(u8::from(flags)).map_err(|_| EncodingError::BufferFull)?;
        body.extend_from_slice(&params.keep_alive_seconds.to_be_bytes())
            .map_err(|_| EncodingError::BufferFull)?;

        string::encode(Some(params.client_id), &mut body)?;
        if let Some(will) = &params.will {
            string::encode(Some(will.topic), &mut body)?;
            string::encode_bytes(will.payload, &mut body)?;
        }
        if let Some(username) = params.username {
            string::encode(Some(username), &mut body)?;
        }
        if let Some(password) = params.password {
            string::encode_bytes(password, &mut body)?;
        }

        // --- Fixed Header ---
        let remaining_len =
            u32::try_from(body.len()).map_err(|_| EncodingError::ValueTooLarge)?;
        let remaining_len = varint::encode(remaining_len)?;

        let mut bytes: Vec<u8, MAX_PACKET_SIZE> = Vec::new();
        bytes.push(CONNECT).map_err(|_| EncodingError::BufferFull)?;
        bytes.extend_from_slice(&remaining_len).map_err(|_| EncodingError::BufferFull)?;
        bytes.extend_from_slice(&body).map_err(|_| EncodingError::BufferFull)?;

        Ok(Self { bytes })
    }

    /// The encoded packet.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`; a CONNECT packet has at least a fixed header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for ConnectPacket {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Decode a complete CONNECT packet back into its parameters.
///
/// The inverse of [`ConnectPacket::build`], used by brokers, test doubles
/// and diagnostics. String and binary fields borrow from `bytes`.
///
/// # Errors
///
/// * [`DecodingError::InvalidResponse`] for a wrong packet type, protocol
///   name or level, an invalid flags byte, or trailing bytes
/// * [`DecodingError::Malformed`] for a bad Remaining Length
/// * [`DecodingError::Truncated`] when a field runs past the packet
/// * [`DecodingError::InvalidUtf8`] for a non UTF-8 string field
pub fn decode(bytes: &[u8]) -> Result<ConnectParameters<'_>, DecodingError> {
    let (&header, rest) = bytes.split_first().ok_or(DecodingError::Truncated)?;
    if header != CONNECT {
        return Err(DecodingError::InvalidResponse);
    }
    let (remaining_len, used) = varint::decode(rest)?;
    let body = &rest[used..];
    if body.len() < remaining_len as usize {
        return Err(DecodingError::Truncated);
    }
    if body.len() > remaining_len as usize {
        return Err(DecodingError::InvalidResponse);
    }

    let mut reader = FieldReader { bytes: body };
    if reader.string()? != PROTOCOL_NAME || reader.byte()? != PROTOCOL_LEVEL {
        return Err(DecodingError::InvalidResponse);
    }
    let flags = ConnectFlags::try_from(reader.byte()?)?;
    let keep_alive_seconds = u16::from_be_bytes([reader.byte()?, reader.byte()?]);

    let client_id = reader.string()?;
    let will = match flags.will {
        Some(will) => Some(LastWill {
            topic: reader.string()?,
            payload: reader.binary()?,
            qos: will.qos as u8,
            retain: will.retain,
        }),
        None => None,
    };
    let username = if flags.username { Some(reader.string()?) } else { None };
    let password = if flags.password { Some(reader.binary()?) } else { None };

    if !reader.bytes.is_empty() {
        return Err(DecodingError::InvalidResponse);
    }

    Ok(ConnectParameters {
        client_id,
        clean_session: flags.clean_session,
        keep_alive_seconds,
        username,
        password,
        will,
    })
}

struct FieldReader<'a> {
    bytes: &'a [u8],
}

impl<'a> FieldReader<'a> {
    fn byte(&mut self) -> Result<u8, DecodingError> {
        let (&b, rest) = self.bytes.split_first().ok_or(DecodingError::Truncated)?;
        self.bytes = rest;
        Ok(b)
    }

    fn string(&mut self) -> Result<&'a str, DecodingError> {
        let (s, used) = string::decode(self.bytes)?;
        self.bytes = &self.bytes[used..];
        Ok(s)
    }

    fn binary(&mut self) -> Result<&'a [u8], DecodingError> {
        let (data, used) = string::decode_bytes(self.bytes)?;
        self.bytes = &self.bytes[used..];
        Ok(data)
    }
}
