//! The request descriptor and the URL parser that fills it.
//!
//! A [`Request`] says where a query goes: the origin host and port, an
//! optional proxy, the user agent, and the resource path. It is owned by the
//! caller and reused across operations, typically by changing the path
//! between calls.
//!
//! ```rust
//! use httptiny::network::application::http::Request;
//!
//! let mut request = Request::from_url("http://example.com:8080/files/report.txt").unwrap();
//! assert_eq!(request.host(), "example.com");
//! assert_eq!(request.port(), 8080);
//! assert_eq!(request.path(), "files/report.txt");
//!
//! request.set_path("files/summary.txt");
//! assert_eq!(request.path(), "files/summary.txt");
//! ```

use core::fmt;
use core::num::NonZeroU16;

use heapless::String;

use super::bounded::{self, truncate};
use super::error::Error;

/// Longest host name accepted, in bytes.
pub const MAX_HOST_LEN: usize = 255;
/// Longest path written into a request target, in bytes. Longer paths are
/// truncated on the wire.
pub const MAX_PATH_LEN: usize = 256;
/// Longest path a descriptor holds, in bytes.
pub const MAX_URL_PATH_LEN: usize = 1024;
/// Longest user agent kept, in bytes. Longer values are truncated.
pub const MAX_USER_AGENT_LEN: usize = 64;
/// Longest origin host name written into a proxied request target.
pub const PROXY_HOST_LIMIT: usize = 128;
/// Port used when a URL does not name one.
pub const DEFAULT_PORT: u16 = 80;
/// User agent sent unless the caller sets another.
pub const DEFAULT_USER_AGENT: &str = concat!("httptiny/", env!("CARGO_PKG_VERSION"));

const SCHEME: &str = "http://";

/// A proxy to route requests through.
///
/// Host and port are set together or not at all.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proxy {
    host: String<MAX_HOST_LEN>,
    port: NonZeroU16,
}

impl Proxy {
    /// Describes a proxy.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrlPort`] for port 0, [`Error::InvalidUrlHost`] for a
    /// host longer than [`MAX_HOST_LEN`].
    pub fn new(host: &str, port: u16) -> Result<Self, Error> {
        Ok(Self {
            host: bounded::exact(host).ok_or(Error::InvalidUrlHost)?,
            port: NonZeroU16::new(port).ok_or(Error::InvalidUrlPort)?,
        })
    }

    /// Proxy host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Proxy port.
    pub fn port(&self) -> u16 {
        self.port.get()
    }
}

/// Where and how to send a query.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    host: String<MAX_HOST_LEN>,
    port: NonZeroU16,
    proxy: Option<Proxy>,
    user_agent: String<MAX_USER_AGENT_LEN>,
    path: String<MAX_URL_PATH_LEN>,
}

impl Default for Request {
    /// No host, port 80, no proxy, the default user agent and an empty path.
    fn default() -> Self {
        Self {
            host: String::new(),
            port: default_port(),
            proxy: None,
            user_agent: bounded::bounded(DEFAULT_USER_AGENT),
            path: String::new(),
        }
    }
}

impl Request {
    /// Describes a direct request to `host:port` for `path`.
    ///
    /// A single leading `/` on `path` is dropped; paths longer than
    /// [`MAX_URL_PATH_LEN`] are truncated.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrlPort`] for port 0, [`Error::InvalidUrlHost`] for a
    /// host longer than [`MAX_HOST_LEN`].
    pub fn new(host: &str, port: u16, path: &str) -> Result<Self, Error> {
        let mut request = Self {
            host: bounded::exact(host).ok_or(Error::InvalidUrlHost)?,
            port: NonZeroU16::new(port).ok_or(Error::InvalidUrlPort)?,
            ..Self::default()
        };
        request.set_path(path);
        Ok(request)
    }

    /// Builds a descriptor from an absolute `http://` URL.
    ///
    /// # Errors
    ///
    /// See [`Request::parse_url`].
    pub fn from_url(url: &str) -> Result<Self, Error> {
        let mut request = Self::default();
        request.parse_url(url)?;
        Ok(request)
    }

    /// Replaces host, port and path with the ones named by `url`.
    ///
    /// The URL must start with `http://` in any letter case. The host runs up
    /// to the first `:` or `/`. After a `:` comes a decimal port; anything
    /// between its digits and the next `/` is ignored. Without a port, port 80
    /// is used. The path is whatever follows the `/` that ends the authority,
    /// or empty. Proxy and user agent are left alone.
    ///
    /// The descriptor is only modified when parsing succeeds.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidUrlScheme`] - the URL does not start with `http://`
    /// * [`Error::InvalidUrlPort`] - the port is missing, not a number, or
    ///   outside `1..=65535`
    /// * [`Error::InvalidUrlHost`] - the host is longer than [`MAX_HOST_LEN`]
    /// * [`Error::InvalidUrlPath`] - the path is longer than [`MAX_URL_PATH_LEN`]
    pub fn parse_url(&mut self, url: &str) -> Result<(), Error> {
        let parts = split_url(url)?;
        let host = bounded::exact(parts.host).ok_or(Error::InvalidUrlHost)?;
        let path = bounded::exact(parts.path).ok_or(Error::InvalidUrlPath)?;
        self.host = host;
        self.port = parts.port;
        self.path = path;
        Ok(())
    }

    /// Origin host name.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Origin port.
    pub fn port(&self) -> u16 {
        self.port.get()
    }

    /// Resource path, without a leading `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Points the descriptor at another resource on the same origin.
    ///
    /// A single leading `/` is dropped; paths longer than
    /// [`MAX_URL_PATH_LEN`] are truncated.
    pub fn set_path(&mut self, path: &str) {
        let path = path.strip_prefix('/').unwrap_or(path);
        self.path = bounded::bounded(path);
    }

    /// The user agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Sets the user agent, truncated to [`MAX_USER_AGENT_LEN`] bytes.
    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = bounded::bounded(user_agent);
    }

    /// Builder form of [`Request::set_user_agent`].
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.set_user_agent(user_agent);
        self
    }

    /// The proxy requests are routed through, if any.
    pub fn proxy(&self) -> Option<&Proxy> {
        self.proxy.as_ref()
    }

    /// Routes requests through `proxy`, or directly when `None`.
    pub fn set_proxy(&mut self, proxy: Option<Proxy>) {
        self.proxy = proxy;
    }

    /// Builder form of [`Request::set_proxy`].
    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Clears every owned string and the proxy. Port goes back to 80.
    ///
    /// The descriptor can be refilled with [`Request::parse_url`].
    pub fn release(&mut self) {
        self.host.clear();
        self.path.clear();
        self.user_agent.clear();
        self.proxy = None;
        self.port = default_port();
    }

    /// The host and port a connection is actually opened to: the proxy when
    /// one is set, the origin otherwise.
    pub fn endpoint(&self) -> (&str, u16) {
        match &self.proxy {
            Some(proxy) => (proxy.host(), proxy.port()),
            None => (self.host(), self.port()),
        }
    }

    /// Writes the request target.
    ///
    /// Direct requests use `/<path>`. Proxied requests use the absolute form
    /// `http://<host>:<port>/<path>` with the host cut to
    /// [`PROXY_HOST_LIMIT`] bytes. The path is cut to [`MAX_PATH_LEN`] bytes
    /// either way.
    pub fn write_target<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        if self.proxy.is_some() {
            write!(
                out,
                "http://{}:{}/",
                truncate(&self.host, PROXY_HOST_LIMIT),
                self.port
            )?;
        } else {
            out.write_char('/')?;
        }
        out.write_str(truncate(&self.path, MAX_PATH_LEN))
    }
}

const fn default_port() -> NonZeroU16 {
    match NonZeroU16::new(DEFAULT_PORT) {
        Some(port) => port,
        None => panic!("default port is zero"),
    }
}

#[derive(Debug)]
struct UrlParts<'a> {
    host: &'a str,
    port: NonZeroU16,
    path: &'a str,
}

fn split_url(url: &str) -> Result<UrlParts<'_>, Error> {
    let rest = match url.get(..SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(SCHEME) => &url[SCHEME.len()..],
        _ => return Err(Error::InvalidUrlScheme),
    };

    let Some(at) = rest.find(|c: char| c == ':' || c == '/') else {
        return Ok(UrlParts {
            host: rest,
            port: default_port(),
            path: "",
        });
    };

    let host = &rest[..at];
    let after = &rest[at + 1..];

    if rest.as_bytes()[at] == b'/' {
        return Ok(UrlParts {
            host,
            port: default_port(),
            path: after,
        });
    }

    let digits = after.bytes().take_while(u8::is_ascii_digit).count();
    let port = after[..digits]
        .parse::<u16>()
        .ok()
        .and_then(NonZeroU16::new)
        .ok_or(Error::InvalidUrlPort)?;
    let path = after.find('/').map_or("", |slash| &after[slash + 1..]);

    Ok(UrlParts { host, port, path })
}
