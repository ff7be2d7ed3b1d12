//! Client-side failure kinds.

use core::fmt;

/// A failure detected by the client before a usable answer was obtained.
///
/// Status codes sent back by the server are not errors at this level; they
/// are returned as a [`StatusCode`](super::StatusCode) and classified by the
/// caller.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The host name (or proxy name) could not be resolved.
    HostNotFound,
    /// A socket could not be created.
    Socket,
    /// The connection to the resolved address failed.
    Connect,
    /// The request head could not be written in full.
    HeaderWrite,
    /// The request body could not be written in full.
    BodyWrite,
    /// The connection failed while reading the status line or headers.
    HeaderRead,
    /// The status line is not `HTTP/1.x NNN`.
    MalformedStatus,
    /// No room was supplied for the response body.
    NullArgument,
    /// The response carries no usable `Content-Length`.
    MissingLength,
    /// The response body does not fit in the space supplied for it.
    OutOfMemory,
    /// The connection ended before the whole body was read.
    BodyRead,
    /// The URL does not start with `http://`.
    InvalidUrlScheme,
    /// The URL names a port that is not a number in `1..=65535`.
    InvalidUrlPort,
    /// The URL names a host longer than [`MAX_HOST_LEN`](super::request::MAX_HOST_LEN).
    InvalidUrlHost,
    /// The URL names a path longer than
    /// [`MAX_URL_PATH_LEN`](super::request::MAX_URL_PATH_LEN).
    InvalidUrlPath,
}

impl Error {
    /// The numeric code historically used for this failure.
    ///
    /// Always negative, so it can share an integer with server status codes.
    pub const fn code(self) -> i32 {
        match self {
            Error::HostNotFound => -1,
            Error::Socket => -2,
            Error::Connect => -3,
            Error::HeaderWrite => -4,
            Error::BodyWrite => -5,
            Error::HeaderRead => -6,
            Error::MalformedStatus => -7,
            Error::NullArgument => -8,
            Error::MissingLength => -9,
            Error::OutOfMemory => -10,
            Error::BodyRead => -11,
            Error::InvalidUrlScheme => -12,
            Error::InvalidUrlPort => -13,
            Error::InvalidUrlHost => -14,
            Error::InvalidUrlPath => -15,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::HostNotFound => "no such host",
            Error::Socket => "can't create socket",
            Error::Connect => "can't connect to host",
            Error::HeaderWrite => "write error while sending request header",
            Error::BodyWrite => "write error while sending request body",
            Error::HeaderRead => "read error while reading response header",
            Error::MalformedStatus => "invalid status line from server",
            Error::NullArgument => "no output buffer",
            Error::MissingLength => "missing or bad content length",
            Error::OutOfMemory => "body does not fit in output buffer",
            Error::BodyRead => "read error while reading response body",
            Error::InvalidUrlScheme => "invalid url: must start with 'http://'",
            Error::InvalidUrlPort => "invalid port in url",
            Error::InvalidUrlHost => "host name too long in url",
            Error::InvalidUrlPath => "path too long in url",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::HostNotFound => defmt::write!(f, "HostNotFound"),
            Error::Socket => defmt::write!(f, "Socket"),
            Error::Connect => defmt::write!(f, "Connect"),
            Error::HeaderWrite => defmt::write!(f, "HeaderWrite"),
            Error::BodyWrite => defmt::write!(f, "BodyWrite"),
            Error::HeaderRead => defmt::write!(f, "HeaderRead"),
            Error::MalformedStatus => defmt::write!(f, "MalformedStatus"),
            Error::NullArgument => defmt::write!(f, "NullArgument"),
            Error::MissingLength => defmt::write!(f, "MissingLength"),
            Error::OutOfMemory => defmt::write!(f, "OutOfMemory"),
            Error::BodyRead => defmt::write!(f, "BodyRead"),
            Error::InvalidUrlScheme => defmt::write!(f, "InvalidUrlScheme"),
            Error::InvalidUrlPort => defmt::write!(f, "InvalidUrlPort"),
            Error::InvalidUrlHost => defmt::write!(f, "InvalidUrlHost"),
            Error::InvalidUrlPath => defmt::write!(f, "InvalidUrlPath"),
        }
    }
}
