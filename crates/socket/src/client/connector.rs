use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::UnixStream;
use tracing::{trace, warn};

/// Default location of the docker engine socket
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/docker.sock";

/// Environment variable naming the docker engine endpoint
pub const DOCKER_HOST_ENV: &str = "DOCKER_HOST";

/// Opens a fresh duplex stream to the peer.
#[async_trait]
pub trait Connect {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send;

    async fn connect(&self) -> io::Result<Self::Stream>;
}

/// Connects to a Unix domain socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnixConnector {
    path: PathBuf,
}

impl UnixConnector {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Uses `unix://` endpoints from `DOCKER_HOST`, the default socket otherwise.
    pub fn from_env() -> Self {
        Self::from_docker_host(std::env::var(DOCKER_HOST_ENV).ok().as_deref())
    }

    fn from_docker_host(docker_host: Option<&str>) -> Self {
        match docker_host.map(str::trim).filter(|host| !host.is_empty()) {
            Some(host) => match host.strip_prefix("unix://") {
                Some(path) if !path.is_empty() => Self::new(path),
                _ => {
                    warn!(docker_host = host, "only unix:// endpoints are supported, using default socket");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for UnixConnector {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}

#[async_trait]
impl Connect for UnixConnector {
    type Stream = UnixStream;

    async fn connect(&self) -> io::Result<UnixStream> {
        trace!(path = %self.path.display(), "connecting to unix socket");
        UnixStream::connect(&self.path).await
    }
}
