//! HTTP exchange types described as plain data.
//!
//! # Design
//! The dispatcher turns a [`Call`](crate::Call) into an `HttpRequest` without
//! touching the network, hands it to a [`Transport`](crate::Transport), and
//! decodes the `HttpResponse` it gets back. Keeping both ends as owned data
//! lets tests inspect exactly what would go over the wire, and lets callers
//! run the exchange with their own HTTP stack.

use std::collections::BTreeMap;
use std::fmt;

/// Parameter mapping sent as query string (GET) or form body (everything else).
///
/// Ordered so the encoded request is the same for the same input.
pub type Params = BTreeMap<String, String>;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether parameters for this verb travel in the body rather than the URL.
    pub fn sends_body(self) -> bool {
        !matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved HTTP request.
///
/// `url` already carries any query string. When `body` is set it is
/// form-urlencoded and `headers` contains the matching `content-type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a transport after executing an `HttpRequest`. The status is
/// kept for diagnostics only; the dispatcher does not interpret it. The body
/// is the bytes exactly as received.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}
