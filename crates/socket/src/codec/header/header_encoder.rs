//! HTTP request head encoder
//!
//! Serializes a [`RequestHead`] into the request line, the header fields and the
//! blank line closing the header section. No request body is ever written.
//!
//! The default fields `Host: docker` and `Connection: close` come first; a
//! caller field with exactly the same name replaces the default value.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::debug;

use crate::ensure;
use crate::protocol::{RequestHead, SendError};

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Header fields sent with every request unless the caller overrides them
pub const DEFAULT_HEADERS: [(&str, &str); 2] = [("Host", "docker"), ("Connection", "close")];

/// Encoder for HTTP request heads implementing the [`Encoder`] trait.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<RequestHead> for HeaderEncoder {
    type Error = SendError;

    /// Encodes the request head into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::InvalidRequest`] if the path or any header field
    /// contains CR or LF, since those would corrupt the request framing.
    fn encode(&mut self, item: RequestHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        ensure!(is_single_line(item.path()), SendError::invalid_request(format!("path {:?} contains CR or LF", item.path())));

        let headers = item.headers().merged_over(&DEFAULT_HEADERS);
        for (name, value) in headers.iter() {
            ensure!(
                !name.is_empty() && !name.contains(':') && is_single_line(name),
                SendError::invalid_request(format!("invalid header name {name:?}"))
            );
            ensure!(is_single_line(value), SendError::invalid_request(format!("header {name} value contains CR or LF")));
        }

        dst.reserve(INIT_HEADER_SIZE);
        write!(FastWrite(dst), "{} {} HTTP/1.1\r\n", item.method(), item.path())?;
        debug!(method = %item.method(), path = item.path(), "encoded request line");

        for (name, value) in headers.iter() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

fn is_single_line(s: &str) -> bool {
    !s.bytes().any(|b| b == b'\r' || b == b'\n')
}

/// Fast writer implementation for writing to BytesMut.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
