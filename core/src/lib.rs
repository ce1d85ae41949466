//! Blocking client for the Jotform REST API.
//!
//! # Overview
//! `JotformClient` maps each API endpoint to a method that formats a path,
//! attaches the `apiKey` header, sends the request and returns the decoded
//! JSON body as a `serde_json::Value`. Nothing is cached and no state is kept
//! between calls.
//!
//! ```no_run
//! use jotform_core::{JotformClient, ListOptions};
//!
//! let client = JotformClient::new("YOUR_API_KEY", "eu", false)?;
//! let forms = client.get_user_forms(&ListOptions::new().limit(20))?;
//! println!("{}", forms["content"]);
//! # Ok::<(), jotform_core::ApiError>(())
//! ```
//!
//! # Design
//! - The datacenter (`default`, `eu`, `hipaa`) fixes both the public host and
//!   the internal `/API` host at construction.
//! - Every endpoint builds a [`Call`]; [`JotformClient::build_request`] and
//!   [`JotformClient::parse_response`] are pure, so the I/O in between can be
//!   done by the bundled `ureq` transport or any other [`Transport`].
//! - Service-level errors (401, 404, ...) come back as JSON values; only
//!   transport failures and non-JSON bodies are `Err`.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{Call, JotformClient};
pub use config::{BaseUrls, ClientConfig, Datacenter};
pub use error::{ApiError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Params};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Access, Credentials, HistoryOptions, ListOptions, NewFolder, NewReport, PdfRequest, ReportType,
};
