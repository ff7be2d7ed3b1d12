//! # Application Layer Network Protocols
//!
//! Protocols in this module sit on top of the transport traits in
//! [`crate::network`] and never touch sockets directly.
//!
//! ## Design Principles
//!
//! - **Connection Agnostic**: Work with any type implementing [`Connect`](crate::network::Connect)
//! - **No-std Compatible**: Designed for embedded systems without heap allocation
//! - **Resource Conscious**: Use fixed-size buffers and minimal memory
//! - **Error Handling**: One error variant per failure a caller may want to tell apart

/// HTTP/1.0 client implementation.
///
/// Provides `GET`, `PUT`, `HEAD` and `DELETE` against an origin server or
/// through a proxy, with `Content-Length` framed bodies.
pub mod http;
