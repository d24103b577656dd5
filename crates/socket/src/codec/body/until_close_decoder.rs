//! Decoder implementation for bodies delimited by connection close.
//!
//! Without `Transfer-Encoding: chunked` the body is every byte the peer sends
//! after the header section, until it closes the connection. No
//! `Content-Length` accounting is done: the request always carries
//! `Connection: close`, so the peer ends the stream once the response is sent.

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::protocol::{ParseError, PayloadItem};

/// A decoder forwarding buffered bytes verbatim until end-of-stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UntilCloseDecoder;

impl UntilCloseDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for UntilCloseDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Emits everything currently buffered as one chunk.
    ///
    /// # Returns
    /// * `Ok(Some(PayloadItem::Chunk(bytes)))` when bytes are buffered
    /// * `Ok(None)` when the buffer is empty and more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }

        let bytes = src.split().freeze();
        trace!(len = bytes.len(), "forward body bytes");
        Ok(Some(PayloadItem::Chunk(bytes)))
    }

    /// The peer closed the connection: flush what is left, then signal EOF.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(item) => Ok(Some(item)),
            None => {
                trace!("peer closed, body finished");
                Ok(Some(PayloadItem::Eof))
            }
        }
    }
}
