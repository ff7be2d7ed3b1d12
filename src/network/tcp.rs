//! Blocking TCP transport backed by `socket2`.
//!
//! Name resolution goes through the platform resolver via
//! [`std::net::ToSocketAddrs`]; the first returned address is used. Socket
//! creation and connect are separate system calls so their failures surface
//! as different [`Error`] variants.

use std::io::{self, Read as _, Write as _};
use std::net::{Shutdown, SocketAddr, ToSocketAddrs};

use socket2::{Domain, Protocol, SockAddr, Socket, Type};

use super::error::Error;
use super::{Close, Connect, Connection, Read, Write};

/// Opens blocking TCP connections. Holds no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl TcpConnector {
    /// Creates a connector.
    pub fn new() -> Self {
        Self
    }
}

/// A blocking TCP stream. No read or write timeouts are set.
#[derive(Debug)]
pub struct TcpConnection {
    socket: Socket,
}

impl Connect for TcpConnector {
    type Address = SocketAddr;
    type Connection = TcpConnection;
    type Error = Error;

    fn resolve(&mut self, host: &str, port: u16) -> Result<Self::Address, Self::Error> {
        (host, port)
            .to_socket_addrs()
            .map_err(|_| Error::UnknownHost)?
            .next()
            .ok_or(Error::UnknownHost)
    }

    fn open(&mut self, address: &Self::Address) -> Result<Self::Connection, Self::Error> {
        let socket = Socket::new(Domain::for_address(*address), Type::STREAM, Some(Protocol::TCP))
            .map_err(|_| Error::SocketError)?;
        Ok(TcpConnection { socket })
    }

    fn connect(
        &mut self,
        connection: &mut Self::Connection,
        address: &Self::Address,
    ) -> Result<(), Self::Error> {
        connection
            .socket
            .connect(&SockAddr::from(*address))
            .map_err(|e| match e.kind() {
                io::ErrorKind::TimedOut => Error::Timeout,
                io::ErrorKind::AddrNotAvailable | io::ErrorKind::InvalidInput => {
                    Error::InvalidAddress
                }
                _ => Error::ConnectionRefused,
            })
    }
}

impl Read for TcpConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.socket.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Err(Error::Timeout),
                Err(_) => return Err(Error::ReadError),
            }
        }
    }
}

impl Write for TcpConnection {
    type Error = Error;

    /// Writes the whole buffer before returning.
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.socket
            .write_all(buf)
            .map_err(|_| Error::WriteError)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.socket.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for TcpConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        // The descriptor is released when `self.socket` drops, whatever
        // shutdown reports.
        match self.socket.shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            Err(_) => Err(Error::NotOpen),
        }
    }
}

impl Connection for TcpConnection {}
