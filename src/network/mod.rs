//! Transport seam for the MQTT handshake.
//!
//! The codec in [`crate::mqtt`] never touches a socket. Whatever carries the
//! bytes (a TCP stack, a serial line, a cellular modem) implements the traits
//! below, and [`crate::mqtt::Client`] drives the CONNECT/CONNACK exchange
//! through them.
//!
//! Blocking transports implement [`Read`], [`Write`] and [`Close`] and then
//! mark themselves as a [`Connection`]. With the `async` feature the
//! `Async*` counterparts are available for executors such as embassy.

#![allow(async_fn_in_trait)]
#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Re-exports of common traits
pub mod prelude {
    #[cfg(feature = "async")]
    pub use super::{AsyncClose, AsyncConnect, AsyncConnection, AsyncRead, AsyncWrite};
    pub use super::{Close, Connect, Connection, Read, Write};
}

/// Byte source half of a connection.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Read available bytes into `buf`.
    ///
    /// Returns the number of bytes read. `Ok(0)` means the peer closed the
    /// stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Byte sink half of a connection.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Write some prefix of `buf`, returning how many bytes were accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;

    /// Flush buffered bytes to the peer.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Tear-down of a connection.
pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A bidirectional, closable byte stream to an MQTT broker.
pub trait Connection: Read + Write + Close {}

/// Something that can open a [`Connection`] to a remote address.
///
/// `remote` is transport specific; TCP implementations take `"host:port"`,
/// e.g. `"broker.local:1883"`.
pub trait Connect {
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Open a connection
    fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error>;
}

/// Async counterpart of [`Read`].
#[cfg(feature = "async")]
pub trait AsyncRead {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection asynchronously
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Async counterpart of [`Write`].
#[cfg(feature = "async")]
pub trait AsyncWrite {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection asynchronously
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer asynchronously
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Async counterpart of [`Close`].
#[cfg(feature = "async")]
pub trait AsyncClose {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection asynchronously
    async fn close(self) -> Result<(), Self::Error>;
}

/// Async counterpart of [`Connection`].
#[cfg(feature = "async")]
pub trait AsyncConnection: AsyncRead + AsyncWrite + AsyncClose {}

/// Async counterpart of [`Connect`].
#[cfg(feature = "async")]
pub trait AsyncConnect {
    /// Associated connection type
    type Connection: AsyncConnection;
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Open a connection asynchronously
    async fn connect(&mut self, remote: &str) -> Result<Self::Connection, Self::Error>;
}
