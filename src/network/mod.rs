//! A network abstraction layer for embedded systems
//!
//! This module provides the transport traits the HTTP client is written
//! against. A transport knows how to turn a host name into an address, how to
//! create a stream socket for that address, and how to connect it. Everything
//! above the transport only ever sees a [`Connection`]: something that can be
//! read from, written to, and closed exactly once.
//!

#![deny(unsafe_code)]

/// Common error types for network operations
pub mod error;

/// Application layer protocols built on the transport traits.
pub mod application;

/// Blocking TCP transport for hosted targets.
#[cfg(feature = "std")]
pub mod tcp;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Close, Connect, Connection, Read, Write};
}

/// Byte source side of a connection.
pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Read data from the connection.
    ///
    /// Returns `Ok(0)` once the peer has closed its side.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Byte sink side of a connection.
pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the connection, returning how many bytes were accepted.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Releases the underlying handle.
pub trait Close {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Close the connection
    fn close(self) -> Result<(), Self::Error>;
}

/// A synchronous connection
pub trait Connection: Read + Write + Close {}

/// A synchronous connector (client).
///
/// The three steps are kept apart so that a caller can tell a name that does
/// not resolve from a socket that cannot be created from a peer that refuses
/// the connection.
pub trait Connect {
    /// A resolved, connectable address.
    type Address;
    /// Associated connection type
    type Connection: Connection;
    /// Associated error type
    type Error: core::fmt::Debug;

    /// Resolve `host` and `port` to an address.
    fn resolve(&mut self, host: &str, port: u16) -> Result<Self::Address, Self::Error>;

    /// Create an unconnected stream socket suitable for `address`.
    fn open(&mut self, address: &Self::Address) -> Result<Self::Connection, Self::Error>;

    /// Connect a socket returned by [`Connect::open`] to `address`.
    ///
    /// On failure the socket is still owned by the caller, who must close it.
    fn connect(
        &mut self,
        connection: &mut Self::Connection,
        address: &Self::Address,
    ) -> Result<(), Self::Error>;
}
