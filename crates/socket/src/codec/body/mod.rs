//! HTTP body handling module for response payloads
//!
//! # Components
//!
//! - [`ChunkedDecoder`]: Handles chunked transfer encoded payloads
//! - [`UntilCloseDecoder`]: Forwards bytes until the peer closes the stream
//! - [`PayloadDecoder`]: Dispatches to one of the above, chosen from the
//!   response head
//!
//! Request bodies are never sent, so there is no encoder counterpart.

mod chunked_decoder;
mod payload_decoder;
mod until_close_decoder;

pub use chunked_decoder::ChunkedDecoder;
pub use chunked_decoder::MAX_CHUNK_SIZE_LINE;
pub use payload_decoder::PayloadDecoder;
pub use until_close_decoder::UntilCloseDecoder;
