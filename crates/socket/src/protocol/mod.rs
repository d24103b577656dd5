//! Core HTTP protocol abstractions for the client side of the exchange.
//!
//! # Architecture
//!
//! - **Message Handling** ([`message`]): frame items produced by the decoder
//!   - [`Message`]: Represents either the response head or payload items
//!   - [`PayloadItem`]: A body chunk or EOF
//!   - [`BodyFraming`]: How the body is delimited on the wire
//!
//! - **Request** ([`request`]): what is sent
//!   - [`Method`], [`RequestHeaders`], [`RequestInit`], [`RequestHead`]
//!
//! - **Response** ([`response`]): what is received
//!   - [`ResponseHead`]: status code, status text and header map
//!   - [`Response`]: the head with its body attached
//!
//! - **Body Streaming** ([`body`]):
//!   - [`ResponseBody`](body::ResponseBody): lazily decoded body implementing
//!     `http_body::Body` and `futures::Stream`
//!
//! - **Error Handling** ([`error`]):
//!   - [`HttpError`]: failure of a whole `request()` call
//!   - [`ParseError`]: response head or body framing errors
//!   - [`SendError`]: request writing errors

mod message;
pub use message::BodyFraming;
pub use message::Message;
pub use message::PayloadItem;

mod request;
pub use request::Method;
pub use request::RequestHead;
pub use request::RequestHeaders;
pub use request::RequestInit;
pub use request::UnknownMethod;

mod response;
pub use response::Response;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;

pub mod body;
