//! HTTP response header decoder
//!
//! This module parses the status line and header section of an HTTP/1.1
//! response out of an accumulating byte buffer. The buffer may grow by any
//! amount between calls; the header section is complete only once the CRLFCRLF
//! terminator is present somewhere in the buffer.
//!
//! # Parsing rules
//!
//! - The status line is split on spaces: the second token is the numeric
//!   status code, the tokens after it form the status text
//! - Each header line is split at its first colon; lines without a colon are
//!   skipped
//! - Field names are case-folded, values are trimmed, the last duplicate wins
//!
//! Bytes following the terminator are left in the buffer untouched: they are
//! the start of the body.

use bytes::BytesMut;
use http::{HeaderMap, HeaderName, HeaderValue};
use tokio_util::codec::Decoder;
use tracing::{trace, warn};

use crate::ensure;
use crate::protocol::{BodyFraming, ParseError, ResponseHead};

/// Maximum size in bytes allowed for the status line plus header section
pub const MAX_HEADER_BYTES: usize = 16 * 1024;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Decoder for HTTP response heads implementing the [`Decoder`] trait.
///
/// The decoder remembers how far it already searched so that a terminator
/// split across two reads is still found without rescanning the whole buffer.
#[derive(Debug, Default)]
pub struct HeaderDecoder {
    searched: usize,
}

impl HeaderDecoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for HeaderDecoder {
    type Item = (ResponseHead, BodyFraming);
    type Error = ParseError;

    /// Attempts to decode a response head from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some((head, framing)))` if the header section is complete; `src`
    ///   is left holding only the bytes after the terminator
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if the status line is malformed or the header
    ///   section exceeds [`MAX_HEADER_BYTES`]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // the terminator may straddle the previous search boundary
        let from = self.searched.saturating_sub(HEADER_TERMINATOR.len() - 1);
        let Some(offset) = find_terminator(&src[from..]).map(|pos| from + pos) else {
            self.searched = src.len();
            // a head of MAX_HEADER_BYTES may still be followed by a partial terminator
            ensure!(
                src.len() < MAX_HEADER_BYTES + HEADER_TERMINATOR.len(),
                ParseError::too_large_header(src.len(), MAX_HEADER_BYTES)
            );
            return Ok(None);
        };

        trace!(header_size = offset, spillover = src.len() - offset - HEADER_TERMINATOR.len(), "found header terminator");
        ensure!(offset <= MAX_HEADER_BYTES, ParseError::too_large_header(offset, MAX_HEADER_BYTES));

        let header_bytes = src.split_to(offset + HEADER_TERMINATOR.len());
        self.searched = 0;

        let head = parse_head(&header_bytes[..offset])?;
        let framing = parse_framing(head.headers());
        Ok(Some((head, framing)))
    }
}

fn find_terminator(bytes: &[u8]) -> Option<usize> {
    bytes.windows(HEADER_TERMINATOR.len()).position(|window| window == HEADER_TERMINATOR)
}

fn parse_head(header_bytes: &[u8]) -> Result<ResponseHead, ParseError> {
    let text = String::from_utf8_lossy(header_bytes);
    let mut lines = text.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let (status, status_text) = parse_status_line(status_line)?;

    let mut headers = HeaderMap::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            trace!(line, "skip header line without colon");
            continue;
        };

        let name = match HeaderName::from_bytes(name.trim().as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                warn!(name, cause = %e, "skip header with invalid name");
                continue;
            }
        };

        let value = match HeaderValue::from_str(value.trim()) {
            Ok(value) => value,
            Err(e) => {
                warn!(%name, cause = %e, "skip header with invalid value");
                continue;
            }
        };

        // insert replaces any previous value: last write wins
        headers.insert(name, value);
    }

    Ok(ResponseHead::new(status, status_text, headers))
}

fn parse_status_line(line: &str) -> Result<(u16, String), ParseError> {
    let mut tokens = line.split(' ');
    let _version = tokens.next();
    let code = tokens.next().ok_or_else(|| ParseError::invalid_status_line(format!("missing status code in {line:?}")))?;

    ensure!(!code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()), ParseError::invalid_status_code(code));
    let status = code.parse::<u16>().map_err(|_| ParseError::invalid_status_code(code))?;

    let status_text = tokens.collect::<Vec<_>>().join(" ");
    Ok((status, status_text))
}

/// Selects the body framing from the response headers.
///
/// The body is chunked when `chunked` is the final transfer coding, compared
/// case-insensitively; every other response is read until the peer closes.
fn parse_framing(headers: &HeaderMap) -> BodyFraming {
    if is_chunked(headers.get(http::header::TRANSFER_ENCODING)) {
        BodyFraming::Chunked
    } else {
        BodyFraming::UntilClose
    }
}

fn is_chunked(header_value: Option<&HeaderValue>) -> bool {
    const CHUNKED: &[u8] = b"chunked";
    if let Some(value) = header_value {
        if let Some(bytes) = value.as_bytes().rsplit(|b| *b == b',').next() {
            return bytes.trim_ascii().eq_ignore_ascii_case(CHUNKED);
        }
    }
    false
}
