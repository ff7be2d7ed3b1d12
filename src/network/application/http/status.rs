//! Server status codes and status-line parsing.

use core::fmt;

/// A three digit status code echoed by the server.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusCode(u16);

impl StatusCode {
    /// Resource successfully read.
    pub const OK: Self = Self(200);
    /// Resource successfully created.
    pub const CREATED: Self = Self(201);
    /// Invalid query.
    pub const BAD_REQUEST: Self = Self(400);
    /// Forbidden.
    pub const FORBIDDEN: Self = Self(403);
    /// Not found.
    pub const NOT_FOUND: Self = Self(404);
    /// Request timeout.
    pub const REQUEST_TIMEOUT: Self = Self(408);
    /// Server error.
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);
    /// Not implemented.
    pub const NOT_IMPLEMENTED: Self = Self(501);
    /// Service overloaded.
    pub const SERVICE_UNAVAILABLE: Self = Self(503);

    /// Wraps a raw code. Returns `None` unless it has exactly three digits.
    pub const fn new(code: u16) -> Option<Self> {
        if code >= 100 && code <= 999 {
            Some(Self(code))
        } else {
            None
        }
    }

    /// The raw numeric code.
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// `2xx`
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// `4xx`
    pub const fn is_client_error(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// `5xx`
    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Parses a status line of the form `HTTP/1.<minor> <code>[ reason]`.
    ///
    /// The minor version is ignored. The code must be exactly three digits.
    /// Returns `None` for anything else, including an empty line.
    ///
    /// ```rust
    /// use httptiny::network::application::http::StatusCode;
    ///
    /// assert_eq!(StatusCode::from_status_line(b"HTTP/1.0 200 OK"), Some(StatusCode::OK));
    /// assert_eq!(StatusCode::from_status_line(b"HTTP/1.1 404"), Some(StatusCode::NOT_FOUND));
    /// assert_eq!(StatusCode::from_status_line(b"HTTP/2 200"), None);
    /// assert_eq!(StatusCode::from_status_line(b"HTTP/1.0 20"), None);
    /// ```
    pub fn from_status_line(line: &[u8]) -> Option<Self> {
        let rest = line.strip_prefix(b"HTTP/1.")?;

        let minor = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        if minor == 0 {
            return None;
        }
        let rest = &rest[minor..];

        let gap = rest.iter().take_while(|b| matches!(b, b' ' | b'\t')).count();
        if gap == 0 {
            return None;
        }

        match &rest[gap..] {
            [a, b, c, tail @ ..]
                if a.is_ascii_digit()
                    && b.is_ascii_digit()
                    && c.is_ascii_digit()
                    && !tail.first().is_some_and(u8::is_ascii_digit) =>
            {
                let code = u16::from(a - b'0') * 100 + u16::from(b - b'0') * 10 + u16::from(c - b'0');
                Self::new(code)
            }
            _ => None,
        }
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u16}", self.0)
    }
}
