//! Transport-level errors

use core::fmt;

/// Failures reported while moving handshake bytes over a connection.
///
/// Transports keep their own error types; the handshake client collapses
/// them into these variants so that callers get one portable vocabulary
/// whatever the underlying stack is.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The remote could not be reached when opening the connection.
    NoConnection,
    /// Sending or flushing the CONNECT packet failed.
    WriteError,
    /// Receiving the CONNACK packet failed.
    ReadError,
    /// The transport gave up waiting for data.
    Timeout,
    /// The peer closed the stream.
    ConnectionClosed,
    /// The remote address was not understood by the transport.
    InvalidAddress,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::NoConnection => "unable to reach remote",
            Error::WriteError => "transport write failed",
            Error::ReadError => "transport read failed",
            Error::Timeout => "transport timed out",
            Error::ConnectionClosed => "connection closed by peer",
            Error::InvalidAddress => "invalid remote address",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::NoConnection => defmt::write!(f, "NoConnection"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::Timeout => defmt::write!(f, "Timeout"),
            Error::ConnectionClosed => defmt::write!(f, "ConnectionClosed"),
            Error::InvalidAddress => defmt::write!(f, "InvalidAddress"),
        }
    }
}
