//! In-memory transport.
//!
//! Answers queries from canned responses keyed by the exact query string and
//! records every query it receives. Clones share state, so a test can keep a
//! handle while a session owns another.
//!
//! Use this transport for:
//! - Testing table decoding and graph expansion without an endpoint
//! - Replaying captured endpoint responses

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::{ResultFormat, Response, Transport};
use crate::model::ResultSet;
use crate::{Error, Result};

#[derive(Debug, Clone)]
enum Canned {
    Results(ResultSet),
    Raw(Vec<u8>),
    Failure { status: u16, body: String },
}

#[derive(Debug, Default)]
struct MemoryInner {
    responses: RwLock<HashMap<String, Canned>>,
    log: Mutex<Vec<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    inner: Arc<MemoryInner>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with a JSON results document.
    pub fn respond_results(&self, query: impl Into<String>, results: ResultSet) {
        self.inner.responses.write().insert(query.into(), Canned::Results(results));
    }

    /// Answer `query` with a raw body (e.g. CONSTRUCT triples).
    pub fn respond_raw(&self, query: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.inner.responses.write().insert(query.into(), Canned::Raw(body.into()));
    }

    /// Answer `query` with a non-success status.
    pub fn respond_error(&self, query: impl Into<String>, status: u16, body: impl Into<String>) {
        self.inner
            .responses
            .write()
            .insert(query.into(), Canned::Failure { status, body: body.into() });
    }

    /// Every query received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.inner.log.lock().clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn run_query(&self, query: &str, format: ResultFormat) -> Result<Response> {
        self.inner.log.lock().push(query.to_owned());
        let canned = self.inner.responses.read().get(query).cloned();
        match canned {
            Some(Canned::Results(rs)) if format.is_json() => Ok(Response::Json(rs)),
            Some(Canned::Results(rs)) => Ok(Response::Raw(serde_json::to_vec(&rs)?)),
            Some(Canned::Raw(body)) => Ok(Response::Raw(body)),
            Some(Canned::Failure { status, body }) => Err(Error::Transport { status, body }),
            None => Err(Error::Transport {
                status: 404,
                body: format!("no canned response for query: {query}"),
            }),
        }
    }
}
