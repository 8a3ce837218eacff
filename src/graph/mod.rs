//! # Graph Materializer
//!
//! Builds node/edge elements and maintains the live element collection:
//! duplicate-free merges and reversible expand/collapse of a node's neighbourhood.
//!
//! ```text
//! collapsed (expanded=false) ──fetch + merge ok──▶ expanded (expanded=true)
//!          ▲                                              │
//!          └──────────────── remove_nodes ────────────────┘
//! ```

pub mod materialize;

pub use materialize::{
    create_graph, generate_edges, generate_nodes, neighbor_labels, neighbor_rows,
    NeighborColumns, NeighborRow,
};

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Element, NodeData};

/// Ordered collection of elements currently shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementSet {
    elements: Vec<Element>,
}

impl ElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.elements.iter().filter_map(Element::as_node).find(|n| n.id == id)
    }

    /// Set the `expanded` flag of every node with this id. Returns whether one was found.
    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> bool {
        let mut found = false;
        for node in self.elements.iter_mut().filter_map(Element::as_node_mut).filter(|n| n.id == id) {
            node.expanded = expanded;
            found = true;
        }
        found
    }

    /// Append every candidate not already present (full structural equality).
    /// Returns the number appended.
    pub fn merge(&mut self, candidates: impl IntoIterator<Item = Element>) -> usize {
        let fresh: Vec<Element> = {
            let present: HashSet<&Element> = self.elements.iter().collect();
            let mut fresh = Vec::new();
            for candidate in candidates {
                if !present.contains(&candidate) && !fresh.contains(&candidate) {
                    fresh.push(candidate);
                }
            }
            fresh
        };
        let added = fresh.len();
        self.elements.extend(fresh);
        debug!(added, total = self.elements.len(), "elements merged");
        added
    }

    /// Collapse `node_id`: drop every element whose `source` is `node_id`
    /// and reset the node's own `expanded` flag. Returns the number removed.
    pub fn remove_nodes(&mut self, node_id: &str) -> usize {
        let before = self.elements.len();
        self.elements.retain(|e| e.source() != node_id);
        let removed = before - self.elements.len();
        self.set_expanded(node_id, false);
        debug!(node = node_id, removed, "neighbourhood collapsed");
        removed
    }
}

impl From<Vec<Element>> for ElementSet {
    fn from(elements: Vec<Element>) -> Self {
        Self { elements }
    }
}
