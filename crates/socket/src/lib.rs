//! A minimal asynchronous HTTP/1.1 client for local control-plane sockets
//!
//! This crate speaks just enough HTTP/1.1 to talk to a daemon listening on a
//! Unix domain socket, such as the docker engine at `/var/run/docker.sock`.
//! It is built on tokio and `tokio_util::codec`.
//!
//! # Features
//!
//! - Header-only requests with the closed set of HTTP/1.1 methods
//! - Response heads parsed from arbitrarily fragmented reads
//! - Chunked transfer encoding and forward-until-close bodies
//! - Lazy bodies implementing `http_body::Body` and `futures::Stream`, suited to
//!   bounded payloads as well as endless log or event streams
//! - One connection per request
//!
//! # Example
//!
//! ```no_run
//! use docker_socket::client::Client;
//! use docker_socket::protocol::{Method, RequestInit};
//! use http_body_util::BodyExt;
//! use tracing::{info, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber)?;
//!
//!     let client = Client::from_env();
//!     let init = RequestInit::new(Method::Get).header("Accept", "application/json");
//!     let response = client.request("/containers/json?all=true", init).await?;
//!     info!(status = response.status(), "containers listed");
//!
//!     let body = response.into_body().collect().await?.to_bytes();
//!     println!("{}", String::from_utf8_lossy(&body));
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: request/response types, body stream and errors
//! - [`codec`]: request encoding and response decoding
//! - [`connection`]: one request/response exchange over a duplex stream
//! - [`client`]: connection establishment, one stream per request
//!
//! ## Error Handling
//!
//! - [`protocol::HttpError`]: a `request()` call failed, no response exists
//! - [`protocol::ParseError`]: malformed or truncated response; when returned
//!   by a body it leaves the already returned head valid
//! - [`protocol::SendError`]: the request could not be written
//!
//! # Limitations
//!
//! - HTTP/1.1 only, no TLS, no compression, no authentication
//! - No request bodies, no keep-alive reuse, no pipelining
//! - Chunk extensions are ignored and trailer fields are never read
//! - Maximum header size: 16KB

pub mod client;
pub mod codec;
pub mod connection;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
