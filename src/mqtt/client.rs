//! Handshake client.
//!
//! Drives one CONNECT/CONNACK round-trip over any [`Connection`] and keeps
//! the resulting [`SessionState`]. The client never retries and has no
//! notion of time; reconnect policy and timeouts belong to the caller and
//! the transport respectively.

use crate::network::error::Error as NetError;
use crate::network::{Close, Connect, Connection, Read, Write};

use super::connack::{self, CONNACK_LEN, ConnAckResult};
use super::connect::{ConnectPacket, ConnectParameters};
use super::error::{DecodingError, Error};
use super::session::SessionState;

/// An MQTT 3.1.1 client performing the connection handshake.
///
/// # Examples
///
/// ```rust,no_run
/// use mqtt_handshake::mqtt::{Client, ConnectParameters};
/// # use mqtt_handshake::network::Connection;
/// # struct TcpConnection;
/// # impl Connection for TcpConnection {}
/// # impl mqtt_handshake::network::Read for TcpConnection {
/// #     type Error = ();
/// #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
/// # }
/// # impl mqtt_handshake::network::Write for TcpConnection {
/// #     type Error = ();
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl mqtt_handshake::network::Close for TcpConnection {
/// #     type Error = ();
/// #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
/// # }
///
/// let mut client = Client::new(TcpConnection);
/// let params = ConnectParameters {
///     keep_alive_seconds: 60,
///     ..ConnectParameters::new("weather_station")
/// };
///
/// match client.connect(&params) {
///     Ok(result) if result.is_accepted() => { /* ready */ }
///     Ok(result) => { /* refused, see result.return_code */ }
///     Err(e) => { /* nothing usable came back */ }
/// }
/// ```
#[derive(Debug)]
pub struct Client<C: Connection> {
    connection: C,
    session: SessionState,
}

impl<C: Connection> Client<C> {
    /// Wrap an open connection. The session starts as
    /// [`SessionState::NeverConnected`].
    pub fn new(connection: C) -> Self {
        Self {
            connection,
            session: SessionState::default(),
        }
    }

    /// Open a connection to `remote` through `network` and wrap it.
    ///
    /// # Errors
    ///
    /// [`Error::Transport`] with [`NetError::NoConnection`] when the
    /// transport cannot reach the remote.
    pub fn open<N>(network: &mut N, remote: &str) -> Result<Self, Error>
    where
        N: Connect<Connection = C>,
    {
        let connection = network
            .connect(remote)
            .map_err(|_| NetError::NoConnection)?;
        Ok(Self::new(connection))
    }

    /// Send a CONNECT built from `params` and wait for the CONNACK.
    ///
    /// A refusal by the broker is not an error: the returned
    /// [`ConnAckResult`] carries the return code. The session state is
    /// updated whenever a reply was awaited.
    ///
    /// # Errors
    ///
    /// * [`Error::Encoding`] if the packet could not be built; nothing is
    ///   sent and the session state is untouched
    /// * [`Error::Transport`] if sending fails (session untouched) or
    ///   receiving fails (session marked failed)
    /// * [`Error::Decoding`] if the reply is not a valid CONNACK, including
    ///   a stream that closes early
    pub fn connect(&mut self, params: &ConnectParameters<'_>) -> Result<ConnAckResult, Error> {
        let packet = ConnectPacket::build(params)?;
        self.send(packet.as_bytes())?;

        let mut buf = [0u8; CONNACK_LEN];
        let received = match self.receive(&mut buf) {
            Ok(n) => n,
            Err(e) => {
                self.session.update(Err(DecodingError::InvalidResponse));
                return Err(e.into());
            }
        };

        let outcome = connack::parse(&buf[..received]);
        self.session.update(outcome);
        match outcome {
            Ok(result) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("mqtt: CONNACK {}", result);
                Ok(result)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("mqtt: invalid CONNACK ({} bytes): {}", received, e);
                Err(e.into())
            }
        }
    }

    /// The outcome of the last handshake.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether the broker accepted the last handshake.
    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Close the underlying connection.
    pub fn close(self) -> Result<(), Error> {
        self.connection
            .close()
            .map_err(|_| Error::Transport(NetError::ConnectionClosed))
    }

    /// Give back the underlying connection.
    pub fn into_inner(self) -> C {
        self.connection
    }

    fn send(&mut self, mut bytes: &[u8]) -> Result<(), NetError> {
        while !bytes.is_empty() {
            match self.connection.write(bytes) {
                Ok(0) => return Err(NetError::ConnectionClosed),
                Ok(n) => bytes = &bytes[n..],
                Err(_) => return Err(NetError::WriteError),
            }
        }
        self.connection.flush().map_err(|_| NetError::WriteError)
    }

    /// Read until the CONNACK buffer is full or the peer closes.
    fn receive(&mut self, buf: &mut [u8; CONNACK_LEN]) -> Result<usize, NetError> {
        let mut total_read = 0;
        while total_read < buf.len() {
            match self.connection.read(&mut buf[total_read..]) {
                Ok(0) => break,
                Ok(n) => total_read += n,
                Err(_) => return Err(NetError::ReadError),
            }
        }
        Ok(total_read)
    }
}

#[cfg(feature = "async")]
pub use self::nonblocking::AsyncClient;

#[cfg(feature = "async")]
mod nonblocking {
    use crate::network::error::Error as NetError;
    use crate::network::{AsyncClose, AsyncConnect, AsyncConnection, AsyncRead, AsyncWrite};

    use crate::mqtt::connack::{self, CONNACK_LEN, ConnAckResult};
    use crate::mqtt::connect::{ConnectPacket, ConnectParameters};
    use crate::mqtt::error::{DecodingError, Error};
    use crate::mqtt::session::SessionState;

    /// Async counterpart of [`Client`](super::Client).
    #[derive(Debug)]
    pub struct AsyncClient<C: AsyncConnection> {
        connection: C,
        session: SessionState,
    }

    impl<C: AsyncConnection> AsyncClient<C> {
        /// Wrap an open connection.
        pub fn new(connection: C) -> Self {
            Self {
                connection,
                session: SessionState::default(),
            }
        }

        /// Open a connection to `remote` through `network` and wrap it.
        pub async fn open<N>(network: &mut N, remote: &str) -> Result<Self, Error>
        where
            N: AsyncConnect<Connection = C>,
        {
            let connection = network
                .connect(remote)
                .await
                .map_err(|_| NetError::NoConnection)?;
            Ok(Self::new(connection))
        }

        /// Send a CONNECT built from `params` and await the CONNACK.
        ///
        /// Same contract as [`Client::connect`](super::Client::connect).
        pub async fn connect(
            &mut self,
            params: &ConnectParameters<'_>,
        ) -> Result<ConnAckResult, Error> {
            let packet = ConnectPacket::build(params)?;

            let mut bytes = packet.as_bytes();
            while !bytes.is_empty() {
                match self.connection.write(bytes).await {
                    Ok(0) => return Err(NetError::ConnectionClosed.into()),
                    Ok(n) => bytes = &bytes[n..],
                    Err(_) => return Err(NetError::WriteError.into()),
                }
            }
            self.connection
                .flush()
                .await
                .map_err(|_| NetError::WriteError)?;

            let mut buf = [0u8; CONNACK_LEN];
            let mut total_read = 0;
            while total_read < buf.len() {
                match self.connection.read(&mut buf[total_read..]).await {
                    Ok(0) => break,
                    Ok(n) => total_read += n,
                    Err(_) => {
                        self.session.update(Err(DecodingError::InvalidResponse));
                        return Err(NetError::ReadError.into());
                    }
                }
            }

            let outcome = connack::parse(&buf[..total_read]);
            self.session.update(outcome);
            match outcome {
                Ok(result) => Ok(result),
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("mqtt: invalid CONNACK ({} bytes): {}", total_read, e);
                    Err(e.into())
                }
            }
        }

        /// The outcome of the last handshake.
        pub fn session(&self) -> &SessionState {
            &self.session
        }

        /// Whether the broker accepted the last handshake.
        pub fn is_connected(&self) -> bool {
            self.session.is_connected()
        }

        /// Close the underlying connection.
        pub async fn close(self) -> Result<(), Error> {
            self.connection
                .close()
                .await
                .map_err(|_| Error::Transport(NetError::ConnectionClosed))
        }

        /// Give back the underlying connection.
        pub fn into_inner(self) -> C {
            self.connection
        }
    }
}
