//! Decoder implementation for HTTP chunked transfer encoding.
//!
//! This module decodes response bodies framed as specified in
//! [RFC 7230 Section 4.1](https://tools.ietf.org/html/rfc7230#section-4.1).
//!
//! Every chunk is yielded whole: the decoder waits until the declared size plus
//! the trailing CRLF is buffered, then emits exactly the declared payload.
//! Chunk extensions after `;` are ignored. Nothing after the zero-size chunk is
//! read, so trailer fields are never parsed.

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;
use ChunkedState::*;

use crate::ensure;
use crate::protocol::{ParseError, PayloadItem};

/// Maximum length of a chunk size line, extensions included
pub const MAX_CHUNK_SIZE_LINE: usize = 4 * 1024;

const CRLF: &[u8] = b"\r\n";

/// A decoder for handling HTTP chunked transfer encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkedState,
}

impl ChunkedDecoder {
    /// Creates a new ChunkedDecoder instance.
    ///
    /// The decoder starts by waiting for the size line of the first chunk.
    pub fn new() -> Self {
        Self { state: Size }
    }
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkedState {
    /// Waiting for a full `<hex-size>[;ext]\r\n` line
    Size,
    /// Waiting for `size` payload bytes followed by CRLF
    Data(u64),
    /// The zero-size chunk was read
    End,
}

impl Decoder for ChunkedDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Decodes chunked transfer encoded data from the input buffer.
    ///
    /// # Returns
    /// - `Ok(Some(PayloadItem::Chunk(bytes)))` with one complete chunk payload
    /// - `Ok(Some(PayloadItem::Eof))` once the zero-size chunk is reached
    /// - `Ok(None)` when more data is needed
    /// - `Err(ParseError)` if the chunk framing is invalid
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            match self.state {
                End => {
                    trace!("finished reading chunked data");
                    return Ok(Some(PayloadItem::Eof));
                }

                Size => {
                    let Some(size) = read_size_line(src)? else {
                        return Ok(None);
                    };
                    trace!(size, "read chunk size");
                    self.state = if size == 0 { End } else { Data(size) };
                }

                Data(size) => {
                    // payload and CRLF must be buffered before anything is emitted
                    let Some(needed) = usize::try_from(size).ok().and_then(|s| s.checked_add(CRLF.len())) else {
                        return Err(ParseError::invalid_chunk_size(format!("chunk size {size} is too large")));
                    };
                    if src.len() < needed {
                        return Ok(None);
                    }

                    let payload_len = needed - CRLF.len();
                    ensure!(&src[payload_len..needed] == CRLF, ParseError::InvalidChunkTerminator);

                    let bytes = src.split_to(payload_len).freeze();
                    src.advance(CRLF.len());
                    self.state = Size;

                    trace!(len = bytes.len(), "read chunked bytes");
                    return Ok(Some(PayloadItem::Chunk(bytes)));
                }
            }
        }
    }

    /// Called once the connection reached end-of-stream.
    ///
    /// A body that ends anywhere but after the zero-size chunk was truncated.
    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(buf)? {
            Some(item) => Ok(Some(item)),
            None => match self.state {
                Size => Err(ParseError::premature_close(format!("stream ended while reading chunk size line, {} bytes buffered", buf.len()))),
                Data(size) => Err(ParseError::premature_close(format!(
                    "stream ended inside a chunk, declared {size} bytes but only {} buffered",
                    buf.len()
                ))),
                End => Ok(Some(PayloadItem::Eof)),
            },
        }
    }
}

/// Parses a complete chunk size line and removes it from `src`.
///
/// Returns `Ok(None)` if the line is not terminated yet.
fn read_size_line(src: &mut BytesMut) -> Result<Option<u64>, ParseError> {
    let Some(line_end) = src.windows(CRLF.len()).position(|w| w == CRLF) else {
        // room for the CR of a line that is exactly MAX_CHUNK_SIZE_LINE long
        ensure!(src.len() <= MAX_CHUNK_SIZE_LINE + 1, ParseError::invalid_chunk_size("size line too long"));
        return Ok(None);
    };
    ensure!(line_end <= MAX_CHUNK_SIZE_LINE, ParseError::invalid_chunk_size("size line too long"));

    let line = src.split_to(line_end + CRLF.len());
    let line = &line[..line_end];

    // extensions after ';' carry no meaning here
    let digits = match line.iter().position(|b| *b == b';') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let digits = digits.trim_ascii();

    ensure!(
        !digits.is_empty() && digits.iter().all(u8::is_ascii_hexdigit),
        ParseError::invalid_chunk_size(format!("{:?} is not a hex size", String::from_utf8_lossy(line)))
    );

    let mut size: u64 = 0;
    for b in digits {
        let digit = u64::from(hex_value(*b));
        size = size
            .checked_mul(16)
            .and_then(|s| s.checked_add(digit))
            .ok_or_else(|| ParseError::invalid_chunk_size("invalid overflow chunked length"))?;
    }
    Ok(Some(size))
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b + 10 - b'a',
        b'A'..=b'F' => b + 10 - b'A',
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_basic() {
        let mut buffer: BytesMut = BytesMut::from(&b"10\r\n1234567890abcdef\r\n0\r\n\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let item = decoder.decode(&mut buffer).unwrap().unwrap();
        assert!(item.is_chunk());
        assert_eq!(item.as_bytes().unwrap(), &Bytes::from_static(b"1234567890abcdef"));

        let item = decoder.decode(&mut buffer).unwrap().unwrap();
        assert!(item.is_eof());
    }

    #[test]
    fn test_hello() {
        let mut buffer: BytesMut = BytesMut::from(&b"5\r\nhello\r\n0\r\n\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.into_bytes().unwrap(), Bytes::from_static(b"hello"));

        assert!(decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
        // the final CRLF was never touched
        assert_eq!(&buffer[..], b"\r\n");
    }

    #[test]
    fn test_multiple_chunks() {
        let mut buffer: BytesMut = BytesMut::from(&b"5\r\nhello\r\n7\r\n, world\r\n0\r\n\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap(), &Bytes::copy_from_slice(b"hello"));

        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap(), &Bytes::copy_from_slice(b", world"));

        let eof = decoder.decode(&mut buffer).unwrap().unwrap();
        assert!(eof.is_eof());
    }

    #[test]
    fn test_chunks_with_extensions() {
        let mut buffer: BytesMut = BytesMut::from(&b"5;chunk-ext=value\r\nhello\r\n0;last\r\n\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap(), &Bytes::copy_from_slice(b"hello"));

        let eof = decoder.decode(&mut buffer).unwrap().unwrap();
        assert!(eof.is_eof());
    }

    #[test]
    fn test_uppercase_hex_and_whitespace() {
        let mut buffer: BytesMut = BytesMut::from(&b"A \r\n0123456789\r\n0\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap(), &Bytes::copy_from_slice(b"0123456789"));
        assert!(decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
    }

    #[test]
    fn test_incomplete_chunk_waits_for_all_bytes() {
        let mut buffer: BytesMut = BytesMut::from(&b"5\r\nhel"[..]);
        let mut decoder = ChunkedDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"lo");
        // payload complete but CRLF still missing
        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"\r\n0\r\n\r\n");
        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap(), &Bytes::copy_from_slice(b"hello"));

        assert!(decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
    }

    #[test]
    fn test_size_line_split() {
        let mut buffer: BytesMut = BytesMut::from(&b"1"[..]);
        let mut decoder = ChunkedDecoder::new();
        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"0\r");
        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"\n");
        buffer.extend_from_slice(&[b'x'; 16]);
        buffer.extend_from_slice(b"\r\n");
        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap().len(), 16);
    }

    #[test]
    fn test_invalid_chunk_size() {
        let mut buffer: BytesMut = BytesMut::from(&b"xyz\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidChunkSize { .. })));
    }

    #[test]
    fn test_invalid_size_after_valid_chunk() {
        let mut buffer: BytesMut = BytesMut::from(&b"5\r\nhello\r\n+5\r\nworld\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap(), &Bytes::copy_from_slice(b"hello"));

        let result = decoder.decode(&mut buffer);
        assert!(result.unwrap_err().is_protocol());
    }

    #[test]
    fn test_empty_size_line() {
        let mut buffer: BytesMut = BytesMut::from(&b"\r\n"[..]);
        let result = ChunkedDecoder::new().decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidChunkSize { .. })));
    }

    #[test]
    fn test_overflow_size() {
        let mut buffer: BytesMut = BytesMut::from(&b"fffffffffffffffff\r\n"[..]);
        let result = ChunkedDecoder::new().decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidChunkSize { .. })));
    }

    #[test]
    fn test_missing_crlf() {
        let mut buffer: BytesMut = BytesMut::from(&b"5\r\nhelloBad"[..]);
        let mut decoder = ChunkedDecoder::new();

        let result = decoder.decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidChunkTerminator)));
    }

    #[test]
    fn test_premature_close_inside_chunk() {
        let mut buffer: BytesMut = BytesMut::from(&b"a\r\nhello"[..]);
        let mut decoder = ChunkedDecoder::new();

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        let err = decoder.decode_eof(&mut buffer).unwrap_err();
        assert!(err.is_premature_close());
    }

    #[test]
    fn test_premature_close_before_size_line() {
        let mut buffer: BytesMut = BytesMut::from(&b"5\r\nhello\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        assert!(decoder.decode_eof(&mut buffer).unwrap().unwrap().is_chunk());
        let err = decoder.decode_eof(&mut buffer).unwrap_err();
        assert!(err.is_premature_close());
    }

    #[test]
    fn test_large_chunk() {
        // Create a large chunk (1MB)
        let size = 1024 * 1024;
        let mut data = Vec::with_capacity(size + 16);
        data.extend(format!("{size:x}\r\n").into_bytes());
        data.extend(vec![b'A'; size]);
        data.extend(b"\r\n0\r\n\r\n");

        let mut buffer = BytesMut::from(&data[..]);
        let mut decoder = ChunkedDecoder::new();

        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.as_bytes().unwrap().len(), size);
        assert!(chunk.as_bytes().unwrap().iter().all(|&b| b == b'A'));

        let eof = decoder.decode(&mut buffer).unwrap().unwrap();
        assert!(eof.is_eof());
    }

    #[test]
    fn test_size_line_too_long() {
        // no CRLF in sight
        let mut buffer = BytesMut::from(&vec![b'0'; MAX_CHUNK_SIZE_LINE + 2][..]);
        let result = ChunkedDecoder::new().decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidChunkSize { .. })));

        // CRLF present, but the line before it is too long
        let mut buffer = BytesMut::from(&b"5;"[..]);
        buffer.extend_from_slice(&vec![b'x'; MAX_CHUNK_SIZE_LINE - 1]);
        buffer.extend_from_slice(b"\r\nhello\r\n");
        let result = ChunkedDecoder::new().decode(&mut buffer);
        assert!(matches!(result, Err(ParseError::InvalidChunkSize { .. })));
    }

    #[test]
    fn test_size_line_at_limit_split_before_lf() {
        let mut line = b"5;".to_vec();
        line.resize(MAX_CHUNK_SIZE_LINE, b'x');
        let mut wire = line.clone();
        wire.extend_from_slice(b"\r\nhello\r\n");

        let chunk = ChunkedDecoder::new().decode(&mut BytesMut::from(&wire[..])).unwrap().unwrap();
        assert_eq!(chunk.into_bytes().unwrap(), Bytes::from_static(b"hello"));

        // the read ends between CR and LF
        let mut decoder = ChunkedDecoder::new();
        let mut buffer = BytesMut::from(&wire[..MAX_CHUNK_SIZE_LINE + 1]);
        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(&wire[MAX_CHUNK_SIZE_LINE + 1..]);
        let chunk = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(chunk.into_bytes().unwrap(), Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_zero_size_chunk() {
        let mut buffer: BytesMut = BytesMut::from(&b"0\r\n\r\n"[..]);
        let mut decoder = ChunkedDecoder::new();

        let eof = decoder.decode(&mut buffer).unwrap().unwrap();
        assert!(eof.is_eof());
    }
}
