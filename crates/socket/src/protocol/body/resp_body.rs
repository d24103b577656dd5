use std::pin::Pin;
use std::task::{ready, Context, Poll};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use http_body::{Body, Frame};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::{error, trace};

use crate::codec::ClientCodec;
use crate::protocol::{Message, ParseError, PayloadItem};

/// The body of a response, decoded lazily from the connection.
///
/// `ResponseBody` exclusively owns the connection it reads from. The sequence
/// is forward-only: after the last chunk, or after the first error, the
/// connection is dropped and every further poll yields `None`.
///
/// # Example
///
/// ```no_run
/// use docker_socket::client::Client;
/// use http_body_util::BodyExt;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::unix("/var/run/docker.sock");
/// let response = client.get("/containers/json").await?;
/// let bytes = response.into_body().collect().await?.to_bytes();
/// println!("{}", String::from_utf8_lossy(&bytes));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ResponseBody<S> {
    framed: Option<Framed<S, ClientCodec>>,
    received: u64,
}

impl<S> ResponseBody<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(framed: Framed<S, ClientCodec>) -> Self {
        Self { framed: Some(framed), received: 0 }
    }

    /// Number of body bytes yielded so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Returns true once the body is exhausted or failed.
    pub fn is_finished(&self) -> bool {
        self.framed.is_none()
    }

    fn poll_chunk(&mut self, cx: &mut Context<'_>) -> Poll<Option<Result<Bytes, ParseError>>> {
        let Some(framed) = self.framed.as_mut() else {
            return Poll::Ready(None);
        };

        let result = match ready!(framed.poll_next_unpin(cx)) {
            Some(Ok(Message::Payload(PayloadItem::Chunk(bytes)))) => {
                self.received += bytes.len() as u64;
                return Poll::Ready(Some(Ok(bytes)));
            }

            Some(Ok(Message::Payload(PayloadItem::Eof))) => {
                trace!(received = self.received, "response body finished");
                None
            }

            Some(Ok(Message::Header(_))) => {
                error!("received response head while reading body");
                Some(Err(ParseError::invalid_status_line("unexpected response head inside body")))
            }

            Some(Err(e)) => {
                error!(cause = %e, received = self.received, "read response body error");
                Some(Err(e))
            }

            None => Some(Err(ParseError::premature_close("connection ended without end of body"))),
        };

        // no further read happens on this connection
        self.framed = None;
        Poll::Ready(result)
    }
}

impl<S> Body for ResponseBody<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    type Data = Bytes;
    type Error = ParseError;

    fn poll_frame(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        self.get_mut().poll_chunk(cx).map(|item| item.map(|result| result.map(Frame::data)))
    }

    fn is_end_stream(&self) -> bool {
        self.is_finished()
    }
}

impl<S> Stream for ResponseBody<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    type Item = Result<Bytes, ParseError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().poll_chunk(cx)
    }
}
