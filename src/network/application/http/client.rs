use heapless::{String, Vec};

use super::bounded::{bounded, truncate};
use super::error::Error;
use super::io::{self, MAX_LINE_LEN, ShortRead};
use super::request::Request;
use super::status::StatusCode;
use crate::network::{Close, Connect, Connection};

/// Longest request head (request line, headers and blank line) in bytes.
pub const MAX_HEAD_LEN: usize = 1024;
/// Longest content type kept, in bytes. Longer values are truncated.
pub const MAX_CONTENT_TYPE_LEN: usize = 64;

const MAX_EXTRA_HEADERS_LEN: usize = 160;

/// A media type as reported by or sent to the server.
pub type ContentType = String<MAX_CONTENT_TYPE_LEN>;

/// The request methods this client speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Fetch a resource.
    Get,
    /// Store a resource.
    Put,
    /// Fetch only the headers of a resource.
    Head,
    /// Remove a resource.
    Delete,
}

impl Method {
    /// The method token as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Head => "HEAD",
            Method::Delete => "DELETE",
        }
    }
}

/// The two response header fields the client understands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// Value of the last parseable `Content-Length` line. A negative value
    /// resets it to `None`.
    pub content_length: Option<usize>,
    /// First word of the last `Content-Type` line, truncated to
    /// [`MAX_CONTENT_TYPE_LEN`] bytes.
    pub content_type: Option<ContentType>,
}

/// A fetched resource whose body was written into a caller supplied buffer.
#[derive(Debug, PartialEq, Eq)]
pub struct Resource<'a> {
    /// Status returned by the server.
    pub status: StatusCode,
    /// The body. Empty unless `status` is 200.
    pub body: &'a [u8],
    /// Reported media type, if any.
    pub content_type: Option<ContentType>,
}

/// A fetched resource whose body is stored inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<const N: usize> {
    /// Status returned by the server.
    pub status: StatusCode,
    /// The body. Empty unless `status` is 200.
    pub body: Vec<u8, N>,
    /// Reported media type, if any.
    pub content_type: Option<ContentType>,
}

/// What a `HEAD` query learned about a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Status returned by the server.
    pub status: StatusCode,
    /// Declared body length, if the server sent one.
    pub content_length: Option<usize>,
    /// Reported media type, if any.
    pub content_type: Option<ContentType>,
}

/// A connection whose status line has been read and whose headers and body
/// are still waiting on the wire.
///
/// Only ever produced together with a successfully parsed status. The
/// connection is released only by [`ResponseStream::close`]; dropping the
/// stream leaves the handle to whatever the transport does on drop, which
/// may be nothing.
#[derive(Debug)]
pub struct ResponseStream<C: Connection> {
    connection: C,
    status: StatusCode,
}

impl<C: Connection> ResponseStream<C> {
    /// Status returned by the server.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reads the next header line. See [`io::read_line`].
    pub fn read_line(&mut self, buf: &mut [u8]) -> Result<usize, ShortRead> {
        io::read_line(&mut self.connection, buf)
    }

    /// Reads exactly `buf.len()` body bytes. See [`io::read_exact`].
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<usize, ShortRead> {
        io::read_exact(&mut self.connection, buf)
    }

    /// Consumes the header block up to and including the blank line that
    /// ends it, extracting `Content-Length` and `Content-Type`.
    ///
    /// Header names are matched without regard to case; every other line is
    /// read and discarded. Lines longer than [`MAX_LINE_LEN`] are matched on
    /// their first [`MAX_LINE_LEN`] bytes and the rest is skipped.
    ///
    /// # Errors
    ///
    /// [`Error::HeaderRead`] if the connection fails before the blank line.
    pub fn read_headers(&mut self) -> Result<ResponseHeaders, Error> {
        let mut headers = ResponseHeaders::default();
        let mut line = [0u8; MAX_LINE_LEN];

        loop {
            let len = read_whole_line(&mut self.connection, &mut line)?;
            if len == 0 {
                return Ok(headers);
            }
            let header = &mut line[..len];
            trace!("header: {}", core::str::from_utf8(header).unwrap_or("<binary>"));
            parse_header_line(header, &mut headers);
        }
    }

    /// Closes the connection.
    pub fn close(self) -> Result<(), <C as Close>::Error> {
        self.connection.close()
    }

    fn release(self) {
        discard(self.connection);
    }
}

/// An HTTP/1.0 client.
///
/// Every operation opens a fresh connection through the transport and has
/// closed it again by the time it returns, on success and on every failure.
///
/// # Examples
///
/// ```rust,no_run
/// use httptiny::network::application::http::{Client, Request};
/// # use httptiny::network::{Close, Connect, Connection, Read, Write};
/// # struct Transport;
/// # struct Socket;
/// # impl Connection for Socket {}
/// # impl Read for Socket {
/// #     type Error = ();
/// #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
/// # }
/// # impl Write for Socket {
/// #     type Error = ();
/// #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl Close for Socket {
/// #     type Error = ();
/// #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl Connect for Transport {
/// #     type Address = ();
/// #     type Connection = Socket;
/// #     type Error = ();
/// #     fn resolve(&mut self, _host: &str, _port: u16) -> Result<(), ()> { Ok(()) }
/// #     fn open(&mut self, _address: &()) -> Result<Socket, ()> { Ok(Socket) }
/// #     fn connect(&mut self, _socket: &mut Socket, _address: &()) -> Result<(), ()> { Ok(()) }
/// # }
///
/// let mut client = Client::new(Transport);
/// let mut request = Request::from_url("http://example.com/data.bin").unwrap();
///
/// let mut body = [0u8; 512];
/// let resource = client.get_into(&request, &mut body).unwrap();
/// if resource.status.is_success() {
///     // use resource.body
/// }
///
/// request.set_path("upload.bin");
/// let status = client.put(&request, b"payload", true, Some("application/octet-stream"));
/// ```
#[derive(Debug)]
pub struct Client<T: Connect> {
    transport: T,
}

impl<T: Connect> Client<T> {
    /// Creates a client that connects through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Gives the transport back.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Stores `data` under the descriptor's path.
    ///
    /// Sends `Content-Length`, a `Content-Type` when `content_type` is given
    /// (truncated to [`MAX_CONTENT_TYPE_LEN`] bytes) and `Control: overwrite=1`
    /// when `overwrite` is set. The server's status is returned as is.
    ///
    /// # Errors
    ///
    /// Any connection, write, or status line failure; see [`Error`].
    pub fn put(
        &mut self,
        request: &Request,
        data: &[u8],
        overwrite: bool,
        content_type: Option<&str>,
    ) -> Result<StatusCode, Error> {
        let mut headers: String<MAX_EXTRA_HEADERS_LEN> = String::new();
        write_put_headers(&mut headers, data.len(), overwrite, content_type)
            .map_err(|_| Error::HeaderWrite)?;
        self.query(request, Method::Put, &headers, data)
    }

    /// Fetches the resource into `body`.
    ///
    /// When the status is not 200 the headers are not read and the returned
    /// body is empty.
    ///
    /// # Errors
    ///
    /// * [`Error::NullArgument`] - `body` is empty; nothing is sent
    /// * [`Error::MissingLength`] - no positive `Content-Length`
    /// * [`Error::OutOfMemory`] - the declared length exceeds `body.len()`
    /// * [`Error::BodyRead`] - the connection ended before the whole body
    /// * any connection, write, header, or status line failure
    pub fn get_into<'b>(
        &mut self,
        request: &Request,
        body: &'b mut [u8],
    ) -> Result<Resource<'b>, Error> {
        if body.is_empty() {
            return Err(Error::NullArgument);
        }

        let mut stream = self.open(request, Method::Get, "", &[])?;
        let status = stream.status();
        if status != StatusCode::OK {
            stream.release();
            return Ok(Resource {
                status,
                body: &body[..0],
                content_type: None,
            });
        }

        let result = read_body(&mut stream, body);
        stream.release();

        match result {
            Ok((len, content_type)) => Ok(Resource {
                status,
                body: &body[..len],
                content_type,
            }),
            Err(e) => {
                warn!("GET body failed: {}", e);
                Err(e)
            }
        }
    }

    /// Fetches the resource into an inline buffer of `N` bytes.
    ///
    /// # Errors
    ///
    /// As [`Client::get_into`]; `N == 0` is [`Error::NullArgument`].
    pub fn get<const N: usize>(&mut self, request: &Request) -> Result<Response<N>, Error> {
        let mut body: Vec<u8, N> = Vec::new();
        // Capacity is exactly N.
        let _ = body.resize(N, 0);

        let (status, len, content_type) = {
            let resource = self.get_into(request, &mut body)?;
            (resource.status, resource.body.len(), resource.content_type)
        };
        body.truncate(len);

        Ok(Response {
            status,
            body,
            content_type,
        })
    }

    /// Fetches only the headers of the resource.
    ///
    /// # Errors
    ///
    /// Any connection, write, header, or status line failure; see [`Error`].
    pub fn head(&mut self, request: &Request) -> Result<Metadata, Error> {
        let mut stream = self.open(request, Method::Head, "", &[])?;
        let status = stream.status();
        if status != StatusCode::OK {
            stream.release();
            return Ok(Metadata {
                status,
                content_length: None,
                content_type: None,
            });
        }

        let headers = stream.read_headers();
        stream.release();
        let headers = headers.inspect_err(|e| warn!("HEAD headers failed: {}", e))?;

        Ok(Metadata {
            status,
            content_length: headers.content_length,
            content_type: headers.content_type,
        })
    }

    /// Removes the resource. The server's status is returned as is.
    ///
    /// # Errors
    ///
    /// Any connection, write, or status line failure; see [`Error`].
    pub fn delete(&mut self, request: &Request) -> Result<StatusCode, Error> {
        self.query(request, Method::Delete, "", &[])
    }

    /// Sends a request and returns the status, closing the connection.
    ///
    /// `headers` is inserted verbatim after `User-Agent`; each line must end
    /// in `\r\n`.
    ///
    /// # Errors
    ///
    /// Any connection, write, or status line failure; see [`Error`].
    pub fn query(
        &mut self,
        request: &Request,
        method: Method,
        headers: &str,
        body: &[u8],
    ) -> Result<StatusCode, Error> {
        let stream = self.open(request, method, headers, body)?;
        let status = stream.status();
        stream.release();
        Ok(status)
    }

    /// Sends a request, reads the status line, and hands the still open
    /// connection to the caller.
    ///
    /// On failure the connection has already been closed.
    ///
    /// # Errors
    ///
    /// * [`Error::HostNotFound`] - the endpoint did not resolve
    /// * [`Error::Socket`] - no socket could be created
    /// * [`Error::Connect`] - the endpoint refused the connection
    /// * [`Error::HeaderWrite`] / [`Error::BodyWrite`] - a short or failed write
    /// * [`Error::HeaderRead`] - the connection failed before the status line ended
    /// * [`Error::MalformedStatus`] - the status line is not `HTTP/1.x NNN`
    pub fn open(
        &mut self,
        request: &Request,
        method: Method,
        headers: &str,
        body: &[u8],
    ) -> Result<ResponseStream<T::Connection>, Error> {
        let (host, port) = request.endpoint();

        let address = self.transport.resolve(host, port).map_err(|_| {
            warn!("cannot resolve {}:{}", host, port);
            Error::HostNotFound
        })?;

        let mut connection = self.transport.open(&address).map_err(|_| {
            warn!("cannot create socket for {}:{}", host, port);
            Error::Socket
        })?;

        if self.transport.connect(&mut connection, &address).is_err() {
            warn!("cannot connect to {}:{}", host, port);
            discard(connection);
            return Err(Error::Connect);
        }

        match exchange(&mut connection, request, method, headers, body) {
            Ok(status) => {
                debug!("{} /{} -> {}", method.as_str(), request.path(), status);
                Ok(ResponseStream { connection, status })
            }
            Err(e) => {
                warn!("{} /{} failed: {}", method.as_str(), request.path(), e);
                discard(connection);
                Err(e)
            }
        }
    }
}

/// Writes the request head and body, then reads and parses the status line.
fn exchange<C: Connection>(
    connection: &mut C,
    request: &Request,
    method: Method,
    headers: &str,
    body: &[u8],
) -> Result<StatusCode, Error> {
    let mut head: String<MAX_HEAD_LEN> = String::new();
    write_head(&mut head, request, method, headers).map_err(|_| Error::HeaderWrite)?;

    let sent = connection
        .write(head.as_bytes())
        .map_err(|_| Error::HeaderWrite)?;
    if sent != head.len() {
        return Err(Error::HeaderWrite);
    }

    if !body.is_empty() {
        let sent = connection.write(body).map_err(|_| Error::BodyWrite)?;
        if sent != body.len() {
            return Err(Error::BodyWrite);
        }
    }

    connection.flush().map_err(|_| {
        if body.is_empty() {
            Error::HeaderWrite
        } else {
            Error::BodyWrite
        }
    })?;

    let mut line = [0u8; MAX_LINE_LEN];
    let len = read_whole_line(connection, &mut line)?;
    StatusCode::from_status_line(&line[..len]).ok_or(Error::MalformedStatus)
}

/// Reads a line into `buf`, discarding whatever does not fit.
fn read_whole_line<C: Connection>(connection: &mut C, buf: &mut [u8]) -> Result<usize, Error> {
    let len = io::read_line(connection, buf).map_err(|_| Error::HeaderRead)?;
    if len == buf.len() {
        io::skip_line(connection).map_err(|_| Error::HeaderRead)?;
    }
    Ok(len)
}

/// Formats the request line, `User-Agent`, the extra header lines and the
/// terminating blank line.
pub fn write_head<W: core::fmt::Write>(
    out: &mut W,
    request: &Request,
    method: Method,
    headers: &str,
) -> core::fmt::Result {
    out.write_str(method.as_str())?;
    out.write_char(' ')?;
    request.write_target(out)?;
    write!(
        out,
        " HTTP/1.0\r\nUser-Agent: {}\r\n{}\r\n",
        request.user_agent(),
        headers
    )
}

fn write_put_headers<W: core::fmt::Write>(
    out: &mut W,
    length: usize,
    overwrite: bool,
    content_type: Option<&str>,
) -> core::fmt::Result {
    write!(out, "Content-Length: {}\r\n", length)?;
    if let Some(content_type) = content_type {
        write!(
            out,
            "Content-Type: {}\r\n",
            truncate(content_type, MAX_CONTENT_TYPE_LEN)
        )?;
    }
    if overwrite {
        out.write_str("Control: overwrite=1\r\n")?;
    }
    Ok(())
}

fn read_body<C: Connection>(
    stream: &mut ResponseStream<C>,
    body: &mut [u8],
) -> Result<(usize, Option<ContentType>), Error> {
    let headers = stream.read_headers()?;
    let len = headers
        .content_length
        .filter(|&len| len > 0)
        .ok_or(Error::MissingLength)?;
    let dest = body.get_mut(..len).ok_or(Error::OutOfMemory)?;
    stream.read_exact(dest).map_err(|_| Error::BodyRead)?;
    Ok((len, headers.content_type))
}

/// Lowercases the field name in place and picks out the two known fields.
fn parse_header_line(line: &mut [u8], headers: &mut ResponseHeaders) {
    let name_end = line.iter().position(|&b| b == b':').unwrap_or(line.len());
    line[..name_end].make_ascii_lowercase();

    if let Some(value) = line.strip_prefix(b"content-length:") {
        if let Some(len) = parse_length(value) {
            headers.content_length = len;
        }
    } else if let Some(value) = line.strip_prefix(b"content-type:") {
        if let Some(content_type) = first_word(value) {
            headers.content_type = Some(bounded(content_type));
        }
    }
}

/// Parses a signed decimal after optional whitespace, ignoring anything
/// after the digits.
///
/// `None` when there are no digits, `Some(None)` for a negative or
/// out of range value.
fn parse_length(value: &[u8]) -> Option<Option<usize>> {
    let value = value.trim_ascii_start();
    let (negative, digits) = match value.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, value),
    };
    let count = digits.iter().take_while(|b| b.is_ascii_digit()).count();
    if count == 0 {
        return None;
    }
    if negative {
        return Some(None);
    }

    let mut len: usize = 0;
    for &d in &digits[..count] {
        len = match len
            .checked_mul(10)
            .and_then(|len| len.checked_add(usize::from(d - b'0')))
        {
            Some(len) => len,
            None => return Some(None),
        };
    }
    Some(Some(len))
}

fn first_word(value: &[u8]) -> Option<&str> {
    let value = value.trim_ascii_start();
    let end = value
        .iter()
        .position(u8::is_ascii_whitespace)
        .unwrap_or(value.len());
    match &value[..end] {
        [] => None,
        word => core::str::from_utf8(word).ok(),
    }
}

/// Closes a connection on a path that has already decided its outcome.
fn discard<C: Close>(connection: C) {
    if connection.close().is_err() {
        warn!("close failed");
    }
}
