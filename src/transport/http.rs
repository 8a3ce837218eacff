//! SPARQL protocol over HTTP.
//!
//! POSTs the query form-encoded to the configured endpoint path, with the
//! `Accept` header chosen by [`ResultFormat`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use tracing::{debug, warn};

use super::{EndpointConfig, ResultFormat, Response, Transport};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct HttpTransport {
    config: EndpointConfig,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }
}

/// Error for a non-success status. An unreadable body is logged and left empty.
fn query_failed<E: std::fmt::Display>(status: u16, body: std::result::Result<String, E>) -> Error {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            warn!(status, error = %e, "failed to read error body");
            String::new()
        }
    };
    warn!(status, "query failed");
    Error::Transport { status, body }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn run_query(&self, query: &str, format: ResultFormat) -> Result<Response> {
        let mut form: Vec<(&str, &str)> = self
            .config
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        form.push(("query", query));

        let mut request = self
            .client
            .post(self.config.url())
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, format.accept());
        for (key, value) in &self.config.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        debug!(url = %self.config.url(), ?format, "sending query");
        let response = request.form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(query_failed(status.as_u16(), response.text().await));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_owned();
        let body = response.bytes().await?;
        let trimmed = body.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(body.len());
        Response::from_body(format, &content_type, body[trimmed..].to_vec())
    }
}
