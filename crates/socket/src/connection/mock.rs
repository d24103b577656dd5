use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

/// In-memory duplex stream serving canned response bytes in fixed fragments.
///
/// Everything written to it is recorded and can be inspected through the
/// handle returned by [`MockStream::written`], even after the stream moved into
/// a response body.
#[derive(Debug)]
pub(crate) struct MockStream {
    read_data: Vec<u8>,
    read_pos: usize,
    fragment: usize,
    reads: Arc<Mutex<usize>>,
    written: Arc<Mutex<Vec<u8>>>,
    write_calls: Arc<Mutex<usize>>,
    fail_write: bool,
}

impl MockStream {
    pub(crate) fn new(read_data: impl Into<Vec<u8>>) -> Self {
        Self {
            read_data: read_data.into(),
            read_pos: 0,
            fragment: usize::MAX,
            reads: Arc::default(),
            written: Arc::default(),
            write_calls: Arc::default(),
            fail_write: false,
        }
    }

    /// Serve at most `fragment` bytes per read.
    pub(crate) fn fragment(mut self, fragment: usize) -> Self {
        self.fragment = fragment.max(1);
        self
    }

    pub(crate) fn failing_write(mut self) -> Self {
        self.fail_write = true;
        self
    }

    pub(crate) fn written(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.written)
    }

    pub(crate) fn write_calls(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.write_calls)
    }

    /// Number of reads that returned data or end-of-stream.
    pub(crate) fn reads(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.reads)
    }
}

impl AsyncRead for MockStream {
    fn poll_read(mut self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let remaining = &self.read_data[self.read_pos..];
        let amt = remaining.len().min(buf.remaining()).min(self.fragment);
        buf.put_slice(&remaining[..amt]);
        self.read_pos += amt;
        *self.reads.lock().unwrap() += 1;
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        if self.fail_write {
            return Poll::Ready(Err(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        *self.write_calls.lock().unwrap() += 1;
        self.written.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
