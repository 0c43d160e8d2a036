//! # mqtt-handshake
//!
//! A `no_std` codec for the MQTT 3.1.1 connection handshake: building the
//! CONNECT packet a client sends and decoding the CONNACK a broker returns.
//! It is meant for embedded devices that need to open an MQTT session over
//! whatever transport they have, without an allocator.
//!
//! ## Layout
//!
//! - [`mqtt::varint`]: Remaining Length encoding
//! - [`mqtt::string`]: length-prefixed string and binary fields
//! - [`mqtt::connect`]: CONNECT packet builder and typed connect flags
//! - [`mqtt::connack`]: CONNACK parser
//! - [`mqtt::session`]: last known connection outcome
//! - [`mqtt::client`]: one CONNECT/CONNACK round-trip over a [`network::Connection`]
//! - [`mqtt::config`]: connect parameters from a JSON document
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! mqtt-handshake = "0.1.0"
//! ```
//!
//! ```rust,no_run
//! use mqtt_handshake::mqtt::{Client, ConnectParameters};
//! # use mqtt_handshake::network::Connection;
//! # struct MockConnection;
//! # impl Connection for MockConnection {}
//! # impl mqtt_handshake::network::Read for MockConnection {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl mqtt_handshake::network::Write for MockConnection {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl mqtt_handshake::network::Close for MockConnection {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let mut client = Client::new(MockConnection);
//! let params = ConnectParameters {
//!     keep_alive_seconds: 60,
//!     ..ConnectParameters::new("my_device")
//! };
//!
//! // let result = client.connect(&params)?;
//! // if client.is_connected() { ... }
//! ```
//!
//! ## Optional Features
//!
//! - `std`: implement `std::error::Error` for the error types
//! - `async`: async transport traits and [`mqtt::AsyncClient`]
//! - `defmt`: `defmt::Format` for public types and handshake logging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Transport traits a connection to the broker implements.
pub mod network;

/// CONNECT/CONNACK codec, session state and handshake client.
pub mod mqtt;
