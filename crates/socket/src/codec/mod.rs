//! HTTP codec module for encoding requests and decoding responses
//!
//! This module provides the client half of HTTP/1.1 message processing on top
//! of `tokio_util::codec`. It uses a state machine pattern to handle the
//! response head and the response payload.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`HeaderEncoder`](header::HeaderEncoder): writes the request line and
//!     header fields, no body is ever sent
//!
//! - Response handling:
//!   - [`ResponseDecoder`]: decodes the head, then the payload
//!   - Head parsing via the [`header`] module
//!   - Payload decoding via the [`body`] module
//!
//! - [`ClientCodec`]: both of the above for one `Framed` duplex stream
//!
//! # Example
//!
//! ```
//! use docker_socket::codec::ResponseDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = ResponseDecoder::new();
//! let mut buffer = BytesMut::from(&b"HTTP/1.1 200 OK\r\nApi-Version: 1.45\r\n\r\nOK"[..]);
//! let message = decoder.decode(&mut buffer).unwrap();
//! assert!(message.unwrap().is_header());
//! ```

pub mod body;
pub mod header;
mod client_codec;
mod response_decoder;

pub use client_codec::ClientCodec;
pub use response_decoder::ResponseDecoder;
