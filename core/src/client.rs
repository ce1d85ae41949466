//! Request dispatch for the Jotform API.
//!
//! # Design
//! Every endpoint method reduces to a [`Call`]: a path, a verb, a parameter
//! map and an internal/public flag. `JotformClient` turns a `Call` into an
//! `HttpRequest` (`build_request`), runs it through its [`Transport`], and
//! decodes the body as JSON (`parse_response`). Both halves are public so the
//! exchange can also be driven by a caller-owned HTTP stack.
//!
//! The client holds only immutable configuration, so it can be shared between
//! threads without locking.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::config::{BaseUrls, ClientConfig, Datacenter};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Params};
use crate::transport::{Transport, UreqTransport};

const API_KEY_HEADER: &str = "apiKey";
const REFERER_HEADER: &str = "referer";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// One logical API request before it is resolved against a host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Call {
    pub method: HttpMethod,
    pub path: String,
    pub params: Params,
    pub internal: bool,
}

impl Call {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            internal: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Adds the parameter only when `value` is present.
    pub fn param_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Route the call to the internal host and send a `referer` header.
    pub fn internal(mut self) -> Self {
        self.internal = true;
        self
    }
}

/// Blocking client for the Jotform REST API.
///
/// Endpoint methods live in the [`api`](crate::api) module; all of them
/// delegate to [`JotformClient::call`].
#[derive(Clone)]
pub struct JotformClient<T = UreqTransport> {
    api_key: Arc<SecretString>,
    datacenter: Datacenter,
    base_urls: BaseUrls,
    debug: bool,
    transport: T,
}

impl JotformClient<UreqTransport> {
    /// Build a client from a key, a datacenter selector (`default`, `eu`,
    /// `hipaa`) and a debug flag.
    pub fn new(api_key: impl Into<String>, datacenter: &str, debug: bool) -> Result<Self> {
        let datacenter: Datacenter = datacenter.parse()?;
        Self::from_config(ClientConfig::new(api_key).datacenter(datacenter).debug(debug))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::from_config(&config);
        Self::with_transport(config, transport)
    }

    /// Build a client from the `JOTFORM_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }
}

impl<T: Transport> JotformClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let base_urls = config.resolved_base_urls();
        Ok(Self {
            api_key: Arc::new(config.api_key),
            datacenter: config.datacenter,
            base_urls,
            debug: config.debug,
            transport,
        })
    }

    pub fn datacenter(&self) -> Datacenter {
        self.datacenter
    }

    pub fn base_urls(&self) -> &BaseUrls {
        &self.base_urls
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve `call` into the request that would be sent.
    ///
    /// GET parameters are appended to the URL; for every other verb they are
    /// form-encoded into the body. An empty map sends no parameters at all.
    pub fn build_request(&self, call: &Call) -> Result<HttpRequest> {
        if !call.path.starts_with('/') {
            return Err(ApiError::InvalidPath(call.path.clone()));
        }

        let base = self.base_urls.select(call.internal);
        let mut url = format!("{base}{}", call.path);

        let mut headers = vec![(
            API_KEY_HEADER.to_string(),
            self.api_key.expose_secret().to_string(),
        )];
        if call.internal {
            headers.push((REFERER_HEADER.to_string(), self.base_urls.internal.clone()));
        }

        let mut body = None;
        if !call.params.is_empty() {
            let encoded = serde_urlencoded::to_string(&call.params)?;
            if call.method.sends_body() {
                headers.push(("content-type".to_string(), FORM_CONTENT_TYPE.to_string()));
                body = Some(encoded);
            } else {
                // Some catalog paths already carry a query string.
                url.push(if url.contains('?') { '&' } else { '?' });
                url.push_str(&encoded);
            }
        }

        Ok(HttpRequest {
            method: call.method,
            url,
            headers,
            body,
        })
    }

    /// Decode a response body as JSON, whatever its status.
    ///
    /// The body is decoded from the raw bytes, so invalid UTF-8 is a decode
    /// error rather than a value with replacement characters.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        serde_json::from_slice(&response.body).map_err(|source| ApiError::Decode {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
            source,
        })
    }

    /// Send `call` and return the decoded JSON body.
    ///
    /// Error payloads from the service (unauthorized, not found, ...) are
    /// returned as values; only transport and decode failures are `Err`.
    pub fn call(&self, call: Call) -> Result<Value> {
        let request = self.build_request(&call)?;

        if self.debug {
            tracing::info!(method = %request.method, url = %request.url, "jotform request");
        } else {
            tracing::trace!(method = %request.method, url = %request.url, "jotform request");
        }

        let response = self.transport.execute(&request)?;

        if self.debug {
            tracing::debug!(status = response.status, url = %request.url, "jotform response");
        }

        self.parse_response(response)
    }
}

impl<T> fmt::Debug for JotformClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JotformClient")
            .field("datacenter", &self.datacenter)
            .field("base_urls", &self.base_urls)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
