//! Connect parameters from JSON.
//!
//! Devices are usually provisioned with a small JSON document rather than
//! compiled-in credentials. [`ConnectConfig`] deserialises one without
//! allocating: every string borrows from the input, so the document must
//! outlive the parameters built from it. String values must not contain
//! JSON escape sequences.
//!
//! ```json
//! {
//!   "client_id": "sensor-01",
//!   "clean_session": true,
//!   "keep_alive_seconds": 60,
//!   "username": "device",
//!   "password": "secret",
//!   "will": { "topic": "status/sensor-01", "payload": "offline", "qos": 1, "retain": true }
//! }
//! ```
//!
//! Only `client_id` is required.

use serde::Deserialize;

use super::connect::{ConnectParameters, LastWill};

/// Will section of a [`ConnectConfig`].
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct WillConfig<'a> {
    /// Will topic.
    pub topic: &'a str,
    /// Will payload, taken as UTF-8 text.
    #[serde(default)]
    pub payload: &'a str,
    /// Will QoS, validated when the packet is built.
    #[serde(default)]
    pub qos: u8,
    /// Will retain flag.
    #[serde(default)]
    pub retain: bool,
}

/// Connect settings as stored in a JSON configuration document.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
pub struct ConnectConfig<'a> {
    /// Client identifier.
    pub client_id: &'a str,
    /// Start a clean session. Defaults to `true`.
    #[serde(default = "default_clean_session")]
    pub clean_session: bool,
    /// Keep-alive in seconds. Defaults to 0 (disabled).
    #[serde(default)]
    pub keep_alive_seconds: u16,
    /// Optional username.
    #[serde(default, borrow)]
    pub username: Option<&'a str>,
    /// Optional password.
    #[serde(default, borrow)]
    pub password: Option<&'a str>,
    /// Optional last will.
    #[serde(default, borrow)]
    pub will: Option<WillConfig<'a>>,
}

fn default_clean_session() -> bool {
    true
}

impl<'a> ConnectConfig<'a> {
    /// Parse a configuration document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mqtt_handshake::mqtt::ConnectConfig;
    ///
    /// let config = ConnectConfig::from_json(r#"{"client_id":"dev1","keep_alive_seconds":60}"#).unwrap();
    /// let params = config.to_parameters();
    /// assert_eq!(params.client_id, "dev1");
    /// assert!(params.clean_session);
    /// ```
    pub fn from_json(json: &'a str) -> Result<Self, serde_json_core::de::Error> {
        let (config, _) = serde_json_core::from_str(json)?;
        Ok(config)
    }

    /// Connect parameters borrowing from this configuration.
    ///
    /// No validation happens here; [`ConnectPacket::build`] checks the
    /// result.
    ///
    /// [`ConnectPacket::build`]: super::ConnectPacket::build
    pub fn to_parameters(&self) -> ConnectParameters<'a> {
        ConnectParameters {
            client_id: self.client_id,
            clean_session: self.clean_session,
            keep_alive_seconds: self.keep_alive_seconds,
            username: self.username,
            password: self.password.map(str::as_bytes),
            will: self.will.as_ref().map(|will| LastWill {
                topic: will.topic,
                payload: will.payload.as_bytes(),
                qos: will.qos,
                retain: will.retain,
            }),
        }
    }
}
