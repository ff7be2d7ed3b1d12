//! # httptiny - a tiny HTTP/1.0 client
//!
//! A minimal client for exchanging whole resources with an HTTP server using
//! `GET`, `PUT`, `HEAD` and `DELETE`, directly or through a proxy. It targets
//! cooperative origin servers and proxies that answer with a single
//! `Content-Length` framed body, and it is designed for embedded systems:
//! `no_std`, no heap, fixed-size buffers throughout.
//!
//! ## Features
//!
//! - **Transport agnostic**: runs over anything implementing [`network::Connect`]
//! - **One connection per operation**: every socket is closed before the call returns
//! - **Explicit limits**: host, path, user agent and content type have documented byte bounds
//! - **Typed results**: client failures and server status codes never share a value
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! httptiny = { version = "0.1.0", features = ["std"] }
//! ```
//!
//! ### Fetching a resource
//!
//! ```rust,no_run
//! # #[cfg(feature = "std")]
//! # fn main() {
//! use httptiny::network::application::http::{Client, Request};
//! use httptiny::network::tcp::TcpConnector;
//!
//! let mut request = Request::from_url("http://example.com/index.html").unwrap();
//! let mut client = Client::new(TcpConnector::new());
//!
//! let response = client.get::<4096>(&request).unwrap();
//! if response.status.is_success() {
//!     // response.body holds exactly Content-Length bytes
//! }
//!
//! request.set_path("upload/notes.txt");
//! let status = client.put(&request, b"hello", true, Some("text/plain")).unwrap();
//! # let _ = status;
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```
//!
//! ## Platform Support
//!
//! The protocol code only needs `core`. A blocking TCP transport for hosted
//! targets is available with the `std` feature; embedded targets implement
//! [`network::Connect`] over their own network stack.
//!
//! ## Optional Features
//!
//! - `std`: Blocking TCP transport in [`network::tcp`]
//! - `defmt`: `defmt` logging and `defmt::Format` for error types
//! - `log`: logging through the `log` facade (ignored when `defmt` is on)
//! - `serde`: `Serialize`/`Deserialize` for the request descriptor and status codes

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Transport traits and the protocols built on them.
///
/// The HTTP client lives in [`network::application::http`].
pub mod network;
