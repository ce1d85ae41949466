//! Executing `HttpRequest` values against the network.
//!
//! # Design
//! The dispatcher only ever sees the [`Transport`] trait, so the I/O layer can
//! be swapped: `UreqTransport` is the blocking default, tests plug in a
//! recording double, and callers can bring their own client. Status codes are
//! returned as data; only failures that produce no response at all become
//! errors.

use std::time::Duration;

use ureq::Agent;

use crate::config::{ClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT};
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP exchange.
///
/// Implementations must be safe to share between threads; a client may be
/// used from several threads at once.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new(connect_timeout: Option<Duration>, read_timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(connect_timeout)
            .timeout_recv_response(read_timeout)
            .timeout_recv_body(read_timeout)
            .build()
            .new_agent();
        Self {
            agent,
            body_limit: u64::MAX,
        }
    }

    /// Fail with a transport error once a body grows past `limit` bytes.
    /// `None` removes the limit.
    pub fn body_limit(mut self, limit: Option<u64>) -> Self {
        self.body_limit = limit.unwrap_or(u64::MAX);
        self
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.connect_timeout, config.read_timeout).body_limit(config.max_body_size)
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(DEFAULT_CONNECT_TIMEOUT), Some(DEFAULT_READ_TIMEOUT))
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(bytes) => builder.force_send_body().send(bytes),
                    None => builder.call(),
                }
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if request.method == HttpMethod::Post {
                    self.agent.post(url)
                } else {
                    self.agent.put(url)
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match body {
                    Some(bytes) => builder.send(bytes),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| into_transport_error(url, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // ureq caps bodies at 10 MiB unless told otherwise.
        let body = response
            .body_mut()
            .with_config()
            .limit(self.body_limit)
            .read_to_vec()
            .map_err(|e| into_transport_error(url, e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn into_transport_error(url: &str, err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::timeout(url, err),
        other => TransportError::new(url, other),
    }
}
