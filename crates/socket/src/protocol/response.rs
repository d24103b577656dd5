//! HTTP response head and the response value returned to callers.
//!
//! The head is available as soon as the header section has been parsed; the
//! body is attached as a lazily consumed stream.

use http::{HeaderMap, StatusCode};

/// Parsed status line and header fields of a response.
///
/// Header names are lower-cased, values are trimmed and a repeated field name
/// keeps only its last value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    status: u16,
    status_text: String,
    headers: HeaderMap,
}

impl ResponseHead {
    pub fn new(status: u16, status_text: String, headers: HeaderMap) -> Self {
        Self { status, status_text, headers }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// The typed status code, if the numeric code is within `100..=999`.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Attaches a body to this head.
    pub fn body<B>(self, body: B) -> Response<B> {
        Response { head: self, body }
    }
}

/// A response whose head is parsed and whose body has not been read yet.
#[derive(Debug)]
pub struct Response<B> {
    head: ResponseHead,
    body: B,
}

impl<B> Response<B> {
    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn status(&self) -> u16 {
        self.head.status()
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        self.head.status_code()
    }

    pub fn status_text(&self) -> &str {
        self.head.status_text()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.head.headers()
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn into_body(self) -> B {
        self.body
    }

    pub fn into_parts(self) -> (ResponseHead, B) {
        (self.head, self.body)
    }
}
