use std::io;
use thiserror::Error;

/// The error of a single `request()` exchange, before a response value exists.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("connect error: {source}")]
    Connect { source: io::Error },

    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: SendError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: ParseError,
    },
}

impl HttpError {
    pub fn connect(e: io::Error) -> Self {
        Self::Connect { source: e }
    }

    /// Returns true if the underlying stream failed, whichever side it was on.
    pub fn is_io(&self) -> bool {
        match self {
            HttpError::Connect { .. } => true,
            HttpError::RequestError { source } => matches!(source, SendError::Io { .. }),
            HttpError::ResponseError { source } => source.is_io(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("connection closed before response headers were complete")]
    IncompleteHeader,

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("invalid status line: {reason}")]
    InvalidStatusLine { reason: String },

    #[error("invalid status code: {value:?}")]
    InvalidStatusCode { value: String },

    #[error("invalid chunk size line: {reason}")]
    InvalidChunkSize { reason: String },

    #[error("invalid chunk terminator, expect CRLF after chunk data")]
    InvalidChunkTerminator,

    #[error("connection closed prematurely: {reason}")]
    PrematureClose { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn invalid_status_line<S: ToString>(str: S) -> Self {
        Self::InvalidStatusLine { reason: str.to_string() }
    }

    pub fn invalid_status_code<S: ToString>(str: S) -> Self {
        Self::InvalidStatusCode { value: str.to_string() }
    }

    pub fn invalid_chunk_size<S: ToString>(str: S) -> Self {
        Self::InvalidChunkSize { reason: str.to_string() }
    }

    pub fn premature_close<S: ToString>(str: S) -> Self {
        Self::PrematureClose { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, ParseError::Io { .. })
    }

    #[inline]
    pub fn is_premature_close(&self) -> bool {
        matches!(self, ParseError::PrematureClose { .. })
    }

    /// Returns true if the peer sent bytes that violate the response framing.
    pub fn is_protocol(&self) -> bool {
        !self.is_io() && !self.is_premature_close()
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_request<S: ToString>(str: S) -> Self {
        Self::InvalidRequest { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
