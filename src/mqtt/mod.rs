//! MQTT 3.1.1 connection handshake.
//!
//! The codec half of this module is pure: [`ConnectPacket::build`] turns
//! [`ConnectParameters`] into bytes and [`connack::parse`] turns the broker's
//! four-byte reply into a [`ConnAckResult`]. Neither touches a transport or
//! any shared state, and both fail before producing partial output.
//!
//! [`Client`] glues the codec to a [`Connection`](crate::network::Connection)
//! and records the outcome in a [`SessionState`].
//!
//! ```text
//! ConnectParameters ──build──▶ ConnectPacket ──write──▶ broker
//!                                                         │
//! SessionState ◀──update── ConnAckResult ◀──parse── 4 bytes
//! ```
//!
//! # Example
//!
//! ```rust
//! use mqtt_handshake::mqtt::{connack, ConnectPacket, ConnectParameters, ConnectReturnCode};
//!
//! let params = ConnectParameters {
//!     username: Some("device"),
//!     password: Some(b"secret"),
//!     keep_alive_seconds: 60,
//!     ..ConnectParameters::new("iot_device_123")
//! };
//! let packet = ConnectPacket::build(&params).unwrap();
//! // hand packet.as_bytes() to the transport ...
//!
//! let reply = connack::parse(&[0x20, 0x02, 0x00, 0x00]).unwrap();
//! assert_eq!(reply.return_code, ConnectReturnCode::Accepted);
//! ```

pub mod client;
pub mod config;
pub mod connack;
pub mod connect;
pub mod error;
pub mod session;
pub mod string;
pub mod varint;

#[cfg(feature = "async")]
pub use client::AsyncClient;
pub use client::Client;
pub use config::{ConnectConfig, WillConfig};
pub use connack::{ConnAckResult, ConnectReturnCode};
pub use connect::{ConnectFlags, ConnectPacket, ConnectParameters, LastWill, QoS, WillFlags};
pub use error::{DecodingError, EncodingError, Error, InvalidParameter};
pub use session::SessionState;
