//! HTTP response body handling.
//!
//! Once the response head is parsed, the framed connection (its read buffer
//! holding any spillover bytes included) moves into a [`ResponseBody`]. The
//! body then pulls from the connection only when the caller polls it, so bounded
//! payloads and endless streams such as log tails are consumed the same way.
//!
//! Failures while reading the body are reported by the body itself; the
//! already returned status and headers stay valid.

mod resp_body;

pub use resp_body::ResponseBody;
