use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use tracing::{debug, error};

use crate::codec::ClientCodec;
use crate::protocol::body::ResponseBody;
use crate::protocol::{HttpError, Message, ParseError, RequestHead, RequestInit, Response};

/// Initial capacity of the read buffer accumulating response bytes
pub const READ_BUFFER_CAPACITY: usize = 8 * 1024;

/// An HTTP/1.1 client connection over one duplex byte stream
///
/// `HttpConnection` runs a single exchange:
/// - encoding and writing the request head
/// - reading until the response head is complete
/// - handing the stream, with any bytes read past the head, to the body
///
/// # Type Parameters
///
/// * `S`: The async duplex stream type
#[derive(Debug)]
pub struct HttpConnection<S> {
    framed: Framed<S, ClientCodec>,
}

impl<S> HttpConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self { framed: Framed::with_capacity(stream, ClientCodec::new(), READ_BUFFER_CAPACITY) }
    }

    /// Sends a request and returns as soon as the response head is parsed.
    ///
    /// The body is not read: it is decoded while the caller polls the returned
    /// [`ResponseBody`], and errors found there are reported by the body alone.
    ///
    /// # Errors
    ///
    /// - [`HttpError::RequestError`] if the request can't be written
    /// - [`HttpError::ResponseError`] if the stream fails or ends before a valid
    ///   response head arrived
    pub async fn request(mut self, path: &str, init: RequestInit) -> Result<Response<ResponseBody<S>>, HttpError> {
        let request = RequestHead::new(path, init);
        let method = request.method();

        // using send instead of feed, because the request is header only and
        // must reach the peer before waiting for the response
        self.framed.send(request).await.inspect_err(|e| {
            error!(%method, path, cause = %e, "can't send request");
        })?;

        let head = match self.framed.next().await {
            Some(Ok(Message::Header((head, framing)))) => {
                debug!(%method, path, status = head.status(), ?framing, "received response head");
                head
            }

            Some(Ok(Message::Payload(_))) => {
                error!("received payload before response head");
                return Err(ParseError::invalid_status_line("payload before response head").into());
            }

            Some(Err(e)) => {
                error!(%method, path, cause = %e, "can't receive response head");
                return Err(e.into());
            }

            None => {
                error!(%method, path, "connection closed before response head");
                return Err(ParseError::IncompleteHeader.into());
            }
        };

        Ok(head.body(ResponseBody::new(self.framed)))
    }
}
