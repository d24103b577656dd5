//! HTTP connection handling module
//!
//! This module runs one request/response exchange over an already open duplex
//! stream (a Unix domain socket, a TCP stream, a named pipe, ...).
//!
//! # Components
//!
//! - [`HttpConnection`]: writes the request head, reads the response head and
//!   hands the stream over to the returned body
//!
//! # Ownership
//!
//! [`HttpConnection::request`] consumes the connection. A second request on
//! the same stream while the first body is still being read would corrupt the
//! framing, so it cannot be expressed. Open a new connection per request, see
//! [`Client`](crate::client::Client).

mod http_connection;
#[cfg(test)]
pub(crate) mod mock;

pub use http_connection::HttpConnection;
pub use http_connection::READ_BUFFER_CAPACITY;
