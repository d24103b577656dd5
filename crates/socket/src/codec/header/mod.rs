//! HTTP header processing module for the client side of the exchange
//!
//! - [`HeaderEncoder`]: writes the request line and request header fields
//! - [`HeaderDecoder`]: parses the response status line and header fields
//!   from an accumulating buffer, leaving body bytes in place

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderDecoder;
pub use header_decoder::MAX_HEADER_BYTES;
pub use header_encoder::DEFAULT_HEADERS;
pub use header_encoder::HeaderEncoder;
