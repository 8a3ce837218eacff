//! # sparql-browser — SPARQL results as tables and browsable graphs
//!
//! Turns SPARQL endpoint answers into two shapes:
//! a typed columnar [`Table`] and a deduplicated, labeled node/edge
//! [`Element`] collection that can be expanded and collapsed node by node.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: [`Transport`] is the contract between the session and the endpoint
//! 2. **Clean DTOs**: `Value`, `Table`, `Triple`, `Element` cross all boundaries
//! 3. **Decoding owns nothing**: results → table and text → triples are pure functions
//! 4. **Session-scoped state**: the label index and live elements belong to one [`Session`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sparql_browser::{MemoryTransport, Session};
//!
//! # async fn example() -> sparql_browser::Result<()> {
//! let mut session = Session::with_transport(MemoryTransport::new());
//!
//! // Typed table from a SELECT
//! let table = session.query_table("SELECT ?s ?p ?o { ?s ?p ?o } LIMIT 10").await?;
//! println!("{} rows", table.num_rows());
//!
//! // Graph from a CONSTRUCT, then grow it around one node
//! session.load_graph("CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }", "<http://ex/BOS>").await?;
//! session.expand("<http://ex/BOS>", "SELECT ?s ?p ?obj ?obj_label WHERE { ... }").await?;
//! let payload = session.elements_json()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Transports
//!
//! | Transport | Feature | Description |
//! |-----------|---------|-------------|
//! | Memory | (default) | Canned responses for testing/embedding |
//! | HTTP | `http` | SPARQL protocol over HTTP POST |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod results;
pub mod triples;
pub mod graph;
pub mod index;
pub mod transport;
pub mod export;
#[cfg(feature = "arrow-results")]
pub mod record_batch;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Cell, Column, ColumnType, EdgeData, Element, NodeData, RawCell, ResultSet, Table, Triple,
    Value,
};

// ============================================================================
// Re-exports: Session state and transports
// ============================================================================

pub use graph::{ElementSet, NeighborColumns};
pub use index::LabelIndex;
pub use transport::{EndpointConfig, MemoryTransport, ResultFormat, Response, Transport};
#[cfg(feature = "http")]
pub use transport::HttpTransport;

use tracing::{debug, info};

// ============================================================================
// Session
// ============================================================================

/// One browsing session: a transport plus the label index and the live
/// element collection it builds up. Dropping the session discards both.
pub struct Session<T: Transport> {
    transport: T,
    labels: LabelIndex,
    elements: ElementSet,
    columns: NeighborColumns,
}

impl<T: Transport> Session<T> {
    /// Create an empty session over the given transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            labels: LabelIndex::new(),
            elements: ElementSet::new(),
            columns: NeighborColumns::default(),
        }
    }

    /// Use different column names for neighbour tables.
    pub fn with_neighbor_columns(mut self, columns: NeighborColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    pub fn elements(&self) -> &[Element] {
        self.elements.as_slice()
    }

    /// Element collection as the renderer's JSON payload.
    pub fn elements_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.elements)?)
    }

    /// Run a SELECT and decode it into a typed table.
    pub async fn query_table(&self, query: &str) -> Result<Table> {
        let results = self
            .transport
            .run_query(query, ResultFormat::Json)
            .await?
            .into_results()?;
        results::to_table(&results)
    }

    /// Run a CONSTRUCT/DESCRIBE and replace the live elements with the graph it
    /// describes, rooted at `root`. Labels are registered only if parsing succeeds.
    pub async fn load_graph(&mut self, query: &str, root: &str) -> Result<&[Element]> {
        let text = self
            .transport
            .run_query(query, ResultFormat::Json)
            .await?
            .into_text()?;
        let parsed = triples::parse_into(&text, &mut self.labels)?;
        self.elements = graph::create_graph(&parsed, root, &self.labels).into();
        info!(root, elements = self.elements.len(), "graph loaded");
        Ok(self.elements.as_slice())
    }

    /// Merge a neighbour table for `source` into the live elements and mark
    /// `source` expanded. Returns the number of elements appended.
    ///
    /// Nothing is mutated if the table lacks a required column.
    pub fn merge_neighbors(&mut self, table: &Table, source: &str) -> Result<usize> {
        let updates = graph::neighbor_labels(table, &self.columns)?;
        let rows = graph::neighbor_rows(table, &self.columns)?;

        self.labels.extend(updates);
        let nodes = graph::materialize::nodes_for(&rows, source, &self.labels);
        let edges = graph::materialize::edges_for(&rows, &self.labels);
        let added = self.elements.merge(nodes.into_iter().chain(edges));
        self.elements.set_expanded(source, true);
        Ok(added)
    }

    /// Fetch `node_id`'s neighbourhood with `query` and merge it.
    ///
    /// Already-expanded nodes are left alone. On any failure the session is
    /// unchanged and the node stays collapsed.
    pub async fn expand(&mut self, node_id: &str, query: &str) -> Result<usize> {
        let node = self
            .elements
            .node(node_id)
            .ok_or_else(|| Error::NotFound(format!("node {node_id}")))?;
        if node.expanded {
            debug!(node = node_id, "already expanded");
            return Ok(0);
        }
        let table = self.query_table(query).await?;
        let added = self.merge_neighbors(&table, node_id)?;
        info!(node = node_id, added, "node expanded");
        Ok(added)
    }

    /// Collapse `node_id`, dropping its fetched neighbourhood. Returns the
    /// number of elements removed; collapsed nodes are left alone.
    pub fn collapse(&mut self, node_id: &str) -> Result<usize> {
        let node = self
            .elements
            .node(node_id)
            .ok_or_else(|| Error::NotFound(format!("node {node_id}")))?;
        if !node.expanded {
            return Ok(0);
        }
        Ok(self.elements.remove_nodes(node_id))
    }

    /// Upload a table into named graph `graph` as `INSERT DATA`.
    pub async fn upload_table(&self, table: &Table, graph: &str) -> Result<()> {
        let update = export::insert_data_update(table, graph)?;
        self.transport.run_query(&update, ResultFormat::Json).await?;
        info!(graph, rows = table.num_rows(), "table uploaded");
        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Query failed with status {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Malformed literal {value:?} for datatype {datatype}")]
    MalformedLiteral { datatype: String, value: String },

    #[error("Malformed triple {record:?}: {reason}")]
    MalformedTriple { record: String, reason: &'static str },

    #[error("Malformed results document: {0}")]
    MalformedResults(#[from] serde_json::Error),

    #[error("Response is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "arrow-results")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
