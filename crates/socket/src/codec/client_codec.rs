//! Codec pairing the request encoder with the response decoder, so a single
//! duplex stream can be framed in both directions.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::codec::ResponseDecoder;
use crate::codec::header::HeaderEncoder;
use crate::protocol::{BodyFraming, Message, ParseError, RequestHead, ResponseHead, SendError};

/// Client side HTTP/1.1 codec: encodes a [`RequestHead`], decodes a response.
#[derive(Debug, Default)]
pub struct ClientCodec {
    request_encoder: HeaderEncoder,
    response_decoder: ResponseDecoder,
}

impl ClientCodec {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<RequestHead> for ClientCodec {
    type Error = SendError;

    fn encode(&mut self, item: RequestHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.request_encoder.encode(item, dst)
    }
}

impl Decoder for ClientCodec {
    type Item = Message<(ResponseHead, BodyFraming)>;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        self.response_decoder.decode(src)
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        self.response_decoder.decode_eof(buf)
    }
}
