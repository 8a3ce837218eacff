//! # Transport
//!
//! The contract between the session and whatever talks to the SPARQL endpoint.
//!
//! ## Implementations
//!
//! | Transport | Module | Description |
//! |-----------|--------|-------------|
//! | `MemoryTransport` | `memory` | Canned responses for testing/embedding |
//! | `HttpTransport` | `http` | SPARQL protocol over HTTP POST (feature `http`) |

pub mod memory;
#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::ResultSet;
use crate::Result;

pub use memory::MemoryTransport;
#[cfg(feature = "http")]
pub use http::HttpTransport;

// ============================================================================
// Configuration
// ============================================================================

/// Where and how to send queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// `host:port`, e.g. `127.0.0.1:7070` or `data.nobelprize.org`.
    pub endpoint: String,
    /// Request path on the endpoint.
    pub path: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Extra protocol parameters sent with every query (e.g. `default-graph-uri`).
    pub params: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            endpoint: "127.0.0.1:7070".into(),
            path: "/sparql".into(),
            user_agent: concat!("sparql-browser/", env!("CARGO_PKG_VERSION")).into(),
            timeout_secs: 100,
            params: Vec::new(),
            headers: Vec::new(),
        }
    }
}

impl EndpointConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), ..Self::default() }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Full request URL. Endpoints without a scheme get `http://`.
    pub fn url(&self) -> String {
        if self.endpoint.contains("://") {
            format!("{}{}", self.endpoint, self.path)
        } else {
            format!("http://{}{}", self.endpoint, self.path)
        }
    }
}

// ============================================================================
// Request / response
// ============================================================================

/// Requested result serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultFormat {
    /// SPARQL JSON results, parsed when the endpoint answers with a JSON content type.
    #[default]
    Json,
    /// SPARQL XML results, returned raw.
    Xml,
    /// CSV results, returned raw.
    Csv,
}

impl ResultFormat {
    pub fn accept(&self) -> &'static str {
        match self {
            ResultFormat::Json => "application/sparql-results+json",
            ResultFormat::Xml => "application/sparql-results+xml",
            ResultFormat::Csv => "text/csv, application/sparql-results+csv",
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ResultFormat::Json)
    }
}

/// What the endpoint sent back.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// A parsed SPARQL JSON results document.
    Json(ResultSet),
    /// Body bytes for non-JSON formats (CONSTRUCT/DESCRIBE triples, XML, CSV).
    Raw(Vec<u8>),
}

impl Response {
    /// Decide how to hand back a successful body.
    pub fn from_body(format: ResultFormat, content_type: &str, body: Vec<u8>) -> Result<Self> {
        if format.is_json() && content_type.to_ascii_lowercase().contains("json") {
            return Ok(Response::Json(ResultSet::from_slice(&body)?));
        }
        Ok(Response::Raw(body))
    }

    pub fn into_results(self) -> Result<ResultSet> {
        match self {
            Response::Json(rs) => Ok(rs),
            Response::Raw(body) => Ok(ResultSet::from_slice(&body)?),
        }
    }

    pub fn into_text(self) -> Result<String> {
        match self {
            Response::Raw(body) => Ok(String::from_utf8(body)?),
            Response::Json(_) => Err(crate::Error::UnexpectedResponse(
                "expected a raw triple body, got a JSON results document".into(),
            )),
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends one query and returns the endpoint's answer.
///
/// A non-success status must surface as [`Error::Transport`](crate::Error::Transport)
/// carrying the server's error body. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn run_query(&self, query: &str, format: ResultFormat) -> Result<Response>;
}
