//! Client facade establishing one connection per request.
//!
//! The request header always carries `Connection: close`, so the peer closes
//! the stream after each response. [`Client`] therefore opens a new stream
//! through its [`Connect`] implementation for every call instead of sharing
//! one long-lived connection.

mod connector;

pub use connector::Connect;
pub use connector::UnixConnector;
pub use connector::DEFAULT_SOCKET_PATH;
pub use connector::DOCKER_HOST_ENV;

use std::path::PathBuf;

use tracing::error;

use crate::connection::HttpConnection;
use crate::protocol::body::ResponseBody;
use crate::protocol::{HttpError, RequestInit, Response};

/// A client for a control-plane API reached through a [`Connect`] implementation.
#[derive(Debug, Clone)]
pub struct Client<C> {
    connector: C,
}

impl Client<UnixConnector> {
    /// A client for the docker engine socket at `path`.
    pub fn unix<P: Into<PathBuf>>(path: P) -> Self {
        Self::new(UnixConnector::new(path))
    }

    /// A client for the socket named by `DOCKER_HOST`, or the default socket.
    pub fn from_env() -> Self {
        Self::new(UnixConnector::from_env())
    }
}

impl Default for Client<UnixConnector> {
    fn default() -> Self {
        Self::new(UnixConnector::default())
    }
}

impl<C: Connect> Client<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Opens a connection, sends the request and returns once the response
    /// head is parsed. The body is read lazily from the returned response.
    pub async fn request(&self, path: &str, init: RequestInit) -> Result<Response<ResponseBody<C::Stream>>, HttpError> {
        let stream = self.connector.connect().await.map_err(|e| {
            error!(path, cause = %e, "can't establish connection");
            HttpError::connect(e)
        })?;

        HttpConnection::new(stream).request(path, init).await
    }

    /// Sends a `GET` request with no extra header fields.
    pub async fn get(&self, path: &str) -> Result<Response<ResponseBody<C::Stream>>, HttpError> {
        self.request(path, RequestInit::default()).await
    }
}
