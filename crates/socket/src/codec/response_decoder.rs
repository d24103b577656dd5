//! HTTP response decoder module
//!
//! Decodes one HTTP response from a byte stream: first the head through
//! [`HeaderDecoder`], then the body through the [`PayloadDecoder`] selected
//! from that head.

use crate::codec::body::PayloadDecoder;
use crate::codec::header::HeaderDecoder;
use crate::protocol::{BodyFraming, Message, ParseError, ResponseHead};
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::debug;

/// A decoder for HTTP responses that handles both head and payload
///
/// # State Machine
///
/// The decoder maintains its state through the `payload_decoder` field:
/// - `None`: Currently parsing the head
/// - `Some(PayloadDecoder)`: Currently parsing the payload
///
/// A connection carries a single response, so the payload decoder is kept
/// after EOF and the decoder never returns to parsing a head.
#[derive(Debug, Default)]
pub struct ResponseDecoder {
    header_decoder: HeaderDecoder,
    payload_decoder: Option<PayloadDecoder>,
}

impl ResponseDecoder {
    /// Creates a new `ResponseDecoder` instance
    pub fn new() -> Self {
        Default::default()
    }

    fn decode_head(&mut self, src: &mut BytesMut) -> Result<Option<Message<(ResponseHead, BodyFraming)>>, ParseError> {
        let message = match self.header_decoder.decode(src)? {
            Some((head, framing)) => {
                debug!(status = head.status(), ?framing, spillover = src.len(), "decoded response head");
                self.payload_decoder = Some(framing.into());
                Some(Message::Header((head, framing)))
            }
            None => None,
        };

        Ok(message)
    }
}

impl Decoder for ResponseDecoder {
    type Item = Message<(ResponseHead, BodyFraming)>;
    type Error = ParseError;

    /// Attempts to decode the next response message from the buffer
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Message::Header(_)))`: Successfully decoded the response head
    /// - `Ok(Some(Message::Payload(_)))`: Successfully decoded a payload item
    /// - `Ok(None)`: Need more data to proceed
    /// - `Err(_)`: Encountered a parsing error
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            return Ok(payload_decoder.decode(src)?.map(Message::Payload));
        }

        self.decode_head(src)
    }

    /// Decodes what is left once the peer closed the stream
    ///
    /// A stream that ends before the head is complete is an error, even if no
    /// byte was ever received.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(payload_decoder) = &mut self.payload_decoder {
            return Ok(payload_decoder.decode_eof(buf)?.map(Message::Payload));
        }

        match self.decode_head(buf)? {
            Some(message) => Ok(Some(message)),
            None => Err(ParseError::IncompleteHeader),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PayloadItem;

    #[test]
    fn head_then_spillover() {
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n{\"ok\":"[..]);
        let mut decoder = ResponseDecoder::new();

        let message = decoder.decode(&mut buf).unwrap().unwrap();
        assert!(message.is_header());

        let message = decoder.decode(&mut buf).unwrap().unwrap();
        assert_eq!(message.into_payload_item().unwrap().into_bytes().unwrap(), &b"{\"ok\":"[..]);

        buf.extend_from_slice(b"true}");
        let item = decoder.decode_eof(&mut buf).unwrap().unwrap().into_payload_item().unwrap();
        assert_eq!(item.into_bytes().unwrap(), &b"true}"[..]);

        let item = decoder.decode_eof(&mut buf).unwrap().unwrap().into_payload_item().unwrap();
        assert!(item.is_eof());
    }

    #[test]
    fn chunked_spillover() {
        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n"[..]);
        let mut decoder = ResponseDecoder::new();

        match decoder.decode(&mut buf).unwrap().unwrap() {
            Message::Header((head, framing)) => {
                assert_eq!(head.status(), 200);
                assert!(framing.is_chunked());
            }
            Message::Payload(_) => panic!("expect header"),
        }

        let item = decoder.decode(&mut buf).unwrap().unwrap().into_payload_item().unwrap();
        assert_eq!(item, PayloadItem::Chunk(bytes::Bytes::from_static(b"hello")));

        let item = decoder.decode(&mut buf).unwrap().unwrap().into_payload_item().unwrap();
        assert!(item.is_eof());
    }

    #[test]
    fn eof_before_head() {
        let mut decoder = ResponseDecoder::new();

        let mut buf = BytesMut::from(&b"HTTP/1.1 200 OK\r\nServer: Doc"[..]);
        assert!(decoder.decode(&mut buf).unwrap().is_none());
        assert!(matches!(decoder.decode_eof(&mut buf), Err(ParseError::IncompleteHeader)));

        let mut empty = BytesMut::new();
        assert!(matches!(ResponseDecoder::new().decode_eof(&mut empty), Err(ParseError::IncompleteHeader)));
    }
}
