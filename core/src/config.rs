//! Client configuration: API key, datacenter selection, timeouts.
//!
//! # Design
//! The datacenter decides both hosts the client talks to. They are resolved
//! once into [`BaseUrls`] when the client is built and never change after
//! that. An explicit override exists so tests and proxies can point the
//! client somewhere other than `*.jotform.com`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{ApiError, Result};

pub const API_KEY_ENV: &str = "JOTFORM_API_KEY";
pub const DATACENTER_ENV: &str = "JOTFORM_DATACENTER";
pub const DEBUG_ENV: &str = "JOTFORM_DEBUG";

pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub(crate) const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Jotform datacenter an account lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Datacenter {
    #[default]
    Default,
    Eu,
    Hipaa,
}

impl Datacenter {
    pub const ALL: [Datacenter; 3] = [Datacenter::Default, Datacenter::Eu, Datacenter::Hipaa];

    /// Subdomain serving the public API.
    pub fn public_subdomain(self) -> &'static str {
        match self {
            Datacenter::Default => "api",
            Datacenter::Eu => "eu-api",
            Datacenter::Hipaa => "hipaa-api",
        }
    }

    /// Subdomain serving the internal `/API` endpoints.
    pub fn internal_subdomain(self) -> &'static str {
        match self {
            Datacenter::Default => "www",
            Datacenter::Eu => "eu",
            Datacenter::Hipaa => "hipaa",
        }
    }

    pub fn public_base_url(self) -> String {
        format!("https://{}.jotform.com", self.public_subdomain())
    }

    pub fn internal_base_url(self) -> String {
        format!("https://{}.jotform.com/API", self.internal_subdomain())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Datacenter::Default => "default",
            Datacenter::Eu => "eu",
            Datacenter::Hipaa => "hipaa",
        }
    }
}

impl fmt::Display for Datacenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datacenter {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            // "api" is the selector name older clients used for the default host.
            "default" | "api" => Ok(Datacenter::Default),
            "eu" => Ok(Datacenter::Eu),
            "hipaa" => Ok(Datacenter::Hipaa),
            _ => Err(ApiError::UnknownDatacenter(s.to_string())),
        }
    }
}

/// The two hosts a client sends requests to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrls {
    /// Prefix for regular endpoints, e.g. `https://api.jotform.com`.
    pub public: String,
    /// Prefix for internal endpoints, e.g. `https://www.jotform.com/API`.
    /// Also sent as `referer` on internal calls.
    pub internal: String,
}

impl BaseUrls {
    pub fn new(public: &str, internal: &str) -> Self {
        Self {
            public: public.trim_end_matches('/').to_string(),
            internal: internal.trim_end_matches('/').to_string(),
        }
    }

    pub fn for_datacenter(datacenter: Datacenter) -> Self {
        Self {
            public: datacenter.public_base_url(),
            internal: datacenter.internal_base_url(),
        }
    }

    pub fn select(&self, internal: bool) -> &str {
        if internal {
            &self.internal
        } else {
            &self.public
        }
    }
}

/// Settings a `JotformClient` is built from.
///
/// The API key is kept in a [`SecretString`] so it never shows up in `Debug`
/// output or logs.
#[derive(Debug)]
pub struct ClientConfig {
    pub(crate) api_key: SecretString,
    pub(crate) datacenter: Datacenter,
    pub(crate) debug: bool,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) read_timeout: Option<Duration>,
    pub(crate) max_body_size: Option<u64>,
    pub(crate) base_urls: Option<BaseUrls>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            datacenter: Datacenter::Default,
            debug: false,
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            max_body_size: None,
            base_urls: None,
        }
    }

    /// Build a config from `JOTFORM_API_KEY`, `JOTFORM_DATACENTER` and
    /// `JOTFORM_DEBUG`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| ApiError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Ok(dc) = std::env::var(DATACENTER_ENV) {
            config.datacenter = dc.parse()?;
        }
        if let Ok(flag) = std::env::var(DEBUG_ENV) {
            config.debug = parse_flag(&flag);
        }
        Ok(config)
    }

    pub fn datacenter(mut self, datacenter: Datacenter) -> Self {
        self.datacenter = datacenter;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// `None` disables the connect timeout.
    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Bounds waiting for the response head and reading its body. `None`
    /// disables it.
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Largest response body, in bytes, the client will read. `None` (the
    /// default) reads bodies of any size.
    pub fn max_body_size(mut self, limit: Option<u64>) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Send requests to `base_urls` instead of the datacenter's hosts.
    pub fn base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = Some(base_urls);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        Ok(())
    }

    pub(crate) fn resolved_base_urls(&self) -> BaseUrls {
        self.base_urls
            .clone()
            .unwrap_or_else(|| BaseUrls::for_datacenter(self.datacenter))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datacenter_subdomains() {
        assert_eq!(Datacenter::Default.public_base_url(), "https://api.jotform.com");
        assert_eq!(Datacenter::Default.internal_base_url(), "https://www.jotform.com/API");
        assert_eq!(Datacenter::Eu.public_base_url(), "https://eu-api.jotform.com");
        assert_eq!(Datacenter::Eu.internal_base_url(), "https://eu.jotform.com/API");
        assert_eq!(Datacenter::Hipaa.public_base_url(), "https://hipaa-api.jotform.com");
        assert_eq!(Datacenter::Hipaa.internal_base_url(), "https://hipaa.jotform.com/API");
    }

    #[test]
    fn datacenter_parses_known_selectors() {
        assert_eq!("default".parse::<Datacenter>().unwrap(), Datacenter::Default);
        assert_eq!("api".parse::<Datacenter>().unwrap(), Datacenter::Default);
        assert_eq!("EU".parse::<Datacenter>().unwrap(), Datacenter::Eu);
        assert_eq!(" hipaa ".parse::<Datacenter>().unwrap(), Datacenter::Hipaa);
    }

    #[test]
    fn datacenter_rejects_unknown_selector() {
        let err = "xx".parse::<Datacenter>().unwrap_err();
        assert!(matches!(err, ApiError::UnknownDatacenter(ref s) if s == "xx"));
    }

    #[test]
    fn datacenter_display_parses_back() {
        for dc in Datacenter::ALL {
            assert_eq!(dc.to_string().parse::<Datacenter>().unwrap(), dc);
        }
    }

    #[test]
    fn base_urls_trim_trailing_slash() {
        let urls = BaseUrls::new("http://127.0.0.1:3000/", "http://127.0.0.1:3000/API/");
        assert_eq!(urls.public, "http://127.0.0.1:3000");
        assert_eq!(urls.internal, "http://127.0.0.1:3000/API");
        assert_eq!(urls.select(false), "http://127.0.0.1:3000");
        assert_eq!(urls.select(true), "http://127.0.0.1:3000/API");
    }

    #[test]
    fn override_wins_over_datacenter() {
        let config = ClientConfig::new("key")
            .datacenter(Datacenter::Eu)
            .base_urls(BaseUrls::new("http://localhost:1", "http://localhost:1/API"));
        assert_eq!(config.resolved_base_urls().public, "http://localhost:1");
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.datacenter, Datacenter::Default);
        assert!(!config.debug);
        assert_eq!(config.connect_timeout, Some(DEFAULT_CONNECT_TIMEOUT));
        assert_eq!(config.read_timeout, Some(DEFAULT_READ_TIMEOUT));
        assert_eq!(config.max_body_size, None);
        assert_eq!(
            config.resolved_base_urls(),
            BaseUrls::for_datacenter(Datacenter::Default)
        );
    }

    #[test]
    fn body_limit_is_opt_in() {
        let config = ClientConfig::new("key").max_body_size(Some(1 << 20));
        assert_eq!(config.max_body_size, Some(1 << 20));
        assert_eq!(config.max_body_size(None).max_body_size, None);
    }

    #[test]
    fn blank_api_key_is_rejected() {
        assert!(matches!(
            ClientConfig::new("  ").validate(),
            Err(ApiError::MissingApiKey)
        ));
        assert!(ClientConfig::new("abc").validate().is_ok());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", ClientConfig::new("super-secret-key"));
        assert!(!rendered.contains("super-secret-key"));
    }

    // The only test touching JOTFORM_* variables.
    #[test]
    fn from_env_reads_all_variables() {
        std::env::set_var(API_KEY_ENV, "env-key");
        std::env::set_var(DATACENTER_ENV, "hipaa");
        std::env::set_var(DEBUG_ENV, "true");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key.expose_secret(), "env-key");
        assert_eq!(config.datacenter, Datacenter::Hipaa);
        assert!(config.debug);

        std::env::set_var(DATACENTER_ENV, "mars");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(ApiError::UnknownDatacenter(_))
        ));

        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(DATACENTER_ENV);
        std::env::remove_var(DEBUG_ENV);
        assert!(matches!(ClientConfig::from_env(), Err(ApiError::MissingApiKey)));
    }

    #[test]
    fn flag_values() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
