//! HTTP request description handed to the request encoder.
//!
//! Requests on the docker socket are header-only: a method from a closed set,
//! an opaque path and an ordered list of header fields.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The request methods this transport can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Method {
    pub const ALL: [Method; 9] = [
        Method::Get,
        Method::Head,
        Method::Post,
        Method::Put,
        Method::Delete,
        Method::Connect,
        Method::Options,
        Method::Trace,
        Method::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Connect => "CONNECT",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown http method: {0}")]
pub struct UnknownMethod(String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL.into_iter().find(|m| m.as_str() == s).ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Ordered request header fields.
///
/// Names are compared case-sensitively: `Host` and `host` are two distinct
/// entries. Inserting an existing name replaces its value in place, so the
/// original position is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    entries: Vec<(String, String)>,
}

impl RequestHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, returning the previous value of an exact-match name.
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => Some(std::mem::replace(old, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns `defaults` overlaid with `self`.
    ///
    /// Default fields come first in their own order; a field of `self` with the
    /// exact same name replaces the default value, all others are appended.
    pub fn merged_over(&self, defaults: &[(&str, &str)]) -> RequestHeaders {
        let mut merged = RequestHeaders { entries: Vec::with_capacity(defaults.len() + self.len()) };
        for (name, value) in defaults {
            merged.insert(*name, *value);
        }
        for (name, value) in self.iter() {
            merged.insert(name, value);
        }
        merged
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RequestHeaders {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = RequestHeaders::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Per-call request options: the method and the caller's header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInit {
    pub method: Method,
    pub headers: RequestHeaders,
}

impl RequestInit {
    pub fn new(method: Method) -> Self {
        Self { method, headers: RequestHeaders::new() }
    }

    pub fn header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A fully described request, consumed by the request encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    method: Method,
    path: String,
    headers: RequestHeaders,
}

impl RequestHead {
    pub fn new<P: Into<String>>(path: P, init: RequestInit) -> Self {
        Self { method: init.method, path: path.into(), headers: init.headers }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &RequestHeaders {
        &self.headers
    }
}
