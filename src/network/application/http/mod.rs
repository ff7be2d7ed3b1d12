//! HTTP/1.0 client for embedded systems.
//!
//! This module speaks the small subset of HTTP/1.0 needed to exchange whole
//! resources with a cooperative server or proxy: `GET`, `PUT`, `HEAD` and
//! `DELETE`, one connection per operation, bodies framed by `Content-Length`.
//! It works with any transport implementing [`Connect`](crate::network::Connect)
//! and never allocates.
//!
//! # Features
//!
//! - Request targets in origin form, or absolute form when going through a proxy
//! - Status line parsing for any `HTTP/1.x` server
//! - `Content-Length` and `Content-Type` extraction; other headers are skipped
//! - Bodies read straight into caller supplied or inline fixed-size buffers
//! - Every connection closed before an operation returns
//!
//! # Usage
//!
//! ```rust,no_run
//! use httptiny::network::application::http::{Client, Proxy, Request};
//! # use httptiny::network::{Close, Connect, Connection, Read, Write};
//! # struct Transport;
//! # struct Socket;
//! # impl Connection for Socket {}
//! # impl Read for Socket {
//! #     type Error = ();
//! #     fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> { Ok(0) }
//! # }
//! # impl Write for Socket {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Close for Socket {
//! #     type Error = ();
//! #     fn close(self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl Connect for Transport {
//! #     type Address = ();
//! #     type Connection = Socket;
//! #     type Error = ();
//! #     fn resolve(&mut self, _host: &str, _port: u16) -> Result<(), ()> { Ok(()) }
//! #     fn open(&mut self, _address: &()) -> Result<Socket, ()> { Ok(Socket) }
//! #     fn connect(&mut self, _socket: &mut Socket, _address: &()) -> Result<(), ()> { Ok(()) }
//! # }
//!
//! let request = Request::from_url("http://example.com/status.json")
//!     .unwrap()
//!     .with_proxy(Proxy::new("proxy.local", 3128).unwrap());
//!
//! let mut client = Client::new(Transport);
//! let metadata = client.head(&request).unwrap();
//! // metadata.content_length, metadata.content_type
//! ```

/// Fixed-capacity string helpers with explicit truncation.
pub mod bounded;

/// Client-side failure kinds.
pub mod error;

/// Server status codes.
pub mod status;

/// Line and exact-length readers over a raw connection.
pub mod io;

/// The request descriptor and URL parser.
pub mod request;

/// The query engine and the `GET`/`PUT`/`HEAD`/`DELETE` operations.
pub mod client;

pub use client::{
    Client, ContentType, MAX_CONTENT_TYPE_LEN, Metadata, Method, Resource, Response,
    ResponseHeaders, ResponseStream,
};
pub use error::Error;
pub use io::{MAX_LINE_LEN, ShortRead};
pub use request::{Proxy, Request};
pub use status::StatusCode;
