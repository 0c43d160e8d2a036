//! Last known outcome of the CONNECT/CONNACK exchange.

use serde::Serialize;

use super::connack::ConnAckResult;
use super::error::DecodingError;

/// What the most recent connection attempt produced.
///
/// Code that needs an established session (publishing, subscribing)
/// consults this before acting. The value is owned by whoever manages the
/// connection; sharing it across threads needs external locking.
///
/// ```rust
/// use mqtt_handshake::mqtt::{connack, SessionState};
///
/// let mut session = SessionState::default();
/// assert!(!session.is_connected());
///
/// session.update(connack::parse(&[0x20, 0x02, 0x00, 0x00]));
/// assert!(session.is_connected());
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No CONNECT/CONNACK round-trip has completed yet.
    #[default]
    NeverConnected,
    /// A CONNACK was received. The broker may still have refused the
    /// connection; check the return code or use
    /// [`SessionState::is_connected`].
    Connected(ConnAckResult),
    /// The broker's reply could not be decoded.
    Failed(DecodingError),
}

impl SessionState {
    /// Record the outcome of a round-trip, replacing whatever was stored.
    pub fn update(&mut self, outcome: Result<ConnAckResult, DecodingError>) {
        *self = match outcome {
            Ok(result) => SessionState::Connected(result),
            Err(e) => SessionState::Failed(e),
        };
    }

    /// The stored state.
    pub fn get(&self) -> &SessionState {
        self
    }

    /// The last CONNACK received, if any.
    pub fn last_result(&self) -> Option<&ConnAckResult> {
        match self {
            SessionState::Connected(result) => Some(result),
            _ => None,
        }
    }

    /// Whether the last round-trip ended with the broker accepting the
    /// connection.
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected(result) if result.is_accepted())
    }
}
