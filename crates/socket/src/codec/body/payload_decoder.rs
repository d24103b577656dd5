//! Decoder implementation for HTTP response payloads.
//!
//! The framing is selected once from the response head:
//! - chunked transfer encoding
//! - everything until the connection closes

use crate::codec::body::chunked_decoder::ChunkedDecoder;
use crate::codec::body::until_close_decoder::UntilCloseDecoder;
use crate::protocol::{BodyFraming, ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A unified decoder for handling HTTP response payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    /// The specific decoding strategy to use
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Decode payload until the peer closes the connection
    UntilClose(UntilCloseDecoder),

    /// Decode payload using chunked transfer encoding
    Chunked(ChunkedDecoder),
}

impl PayloadDecoder {
    /// Creates a PayloadDecoder for chunked transfer encoding.
    pub fn chunked() -> Self {
        Self { kind: Kind::Chunked(ChunkedDecoder::new()) }
    }

    /// Creates a PayloadDecoder reading until end-of-stream.
    pub fn until_close() -> Self {
        Self { kind: Kind::UntilClose(UntilCloseDecoder::new()) }
    }

    /// Returns whether this decoder handles chunked transfer encoding.
    pub fn is_chunked(&self) -> bool {
        matches!(self.kind, Kind::Chunked(_))
    }
}

impl From<BodyFraming> for PayloadDecoder {
    fn from(framing: BodyFraming) -> Self {
        match framing {
            BodyFraming::UntilClose => PayloadDecoder::until_close(),
            BodyFraming::Chunked => PayloadDecoder::chunked(),
        }
    }
}

/// Delegates to the appropriate decoder based on the payload type.
impl Decoder for PayloadDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::UntilClose(decoder) => decoder.decode(src),
            Kind::Chunked(decoder) => decoder.decode(src),
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::UntilClose(decoder) => decoder.decode_eof(buf),
            Kind::Chunked(decoder) => decoder.decode_eof(buf),
        }
    }
}
