//! Error types for the Jotform client.
//!
//! # Design
//! Configuration mistakes, transport failures and undecodable bodies each get
//! their own variant so callers can tell "the service is unreachable" from
//! "the service answered with something that is not JSON". Error payloads the
//! service returns as JSON (401, 404, ...) are not errors at this layer; they
//! come back as the decoded value.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `JotformClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The datacenter selector is not one of default / eu / hipaa.
    #[error("unknown datacenter `{0}` (expected one of: default, eu, hipaa)")]
    UnknownDatacenter(String),

    /// No API key was configured.
    #[error("an API key is required")]
    MissingApiKey,

    /// An endpoint path that does not start with `/`.
    #[error("endpoint path must start with '/': `{0}`")]
    InvalidPath(String),

    /// The parameter mapping could not be form-encoded.
    ///
    /// A `Params` map of strings always encodes, so the dispatcher never
    /// returns this today; the encoder's signature is fallible and the error
    /// is surfaced rather than swallowed.
    #[error("failed to encode request parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body is not valid JSON (or not UTF-8). `body` is the
    /// raw body rendered lossily for diagnostics.
    #[error("HTTP {status}: response body is not valid JSON: {source}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// True for failures raised before any request was attempted.
    pub fn is_config(&self) -> bool {
        matches!(self, ApiError::UnknownDatacenter(_) | ApiError::MissingApiKey)
    }
}

/// A connection, TLS or timeout failure reported by a transport.
#[derive(Debug, Error)]
#[error("transport failure for {url}: {source}")]
pub struct TransportError {
    pub url: String,
    pub timed_out: bool,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl TransportError {
    pub fn new(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            url: url.into(),
            timed_out: false,
            source: source.into(),
        }
    }

    pub fn timeout(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            timed_out: true,
            ..Self::new(url, source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_flagged() {
        assert!(ApiError::UnknownDatacenter("xx".into()).is_config());
        assert!(ApiError::MissingApiKey.is_config());
        assert!(!ApiError::InvalidPath("user".into()).is_config());
    }

    #[test]
    fn unknown_datacenter_message_names_the_selector() {
        let msg = ApiError::UnknownDatacenter("xx".into()).to_string();
        assert!(msg.contains("`xx`"));
    }

    #[test]
    fn decode_error_keeps_status_in_message() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = ApiError::Decode {
            status: 502,
            body: "<html>".into(),
            source,
        };
        assert!(err.to_string().starts_with("HTTP 502"));
    }

    #[test]
    fn transport_error_converts_and_keeps_timeout_flag() {
        let err: ApiError =
            TransportError::timeout("https://api.jotform.com/user", "deadline elapsed").into();
        match err {
            ApiError::Transport(inner) => {
                assert!(inner.timed_out);
                assert_eq!(inner.url, "https://api.jotform.com/user");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn encoder_failure_converts_to_encode() {
        // Nested sequences have no form encoding.
        let source = serde_urlencoded::to_string([("a", vec![1, 2])]).unwrap_err();
        let err: ApiError = source.into();
        assert!(matches!(err, ApiError::Encode(_)));
        assert!(!err.is_config());
        assert!(err.to_string().starts_with("failed to encode request parameters"));
    }
}
