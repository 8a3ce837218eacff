//! Visual graph elements handed to the rendering collaborator.
//!
//! Each element serializes as a `{"data": {...}}` envelope.

use serde::{Deserialize, Serialize};

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeData {
    pub id: String,
    pub label: String,
    /// Neighbourhood already fetched and merged.
    pub expanded: bool,
    /// Id of the node whose fetch produced this one.
    pub source: String,
}

/// Edge payload. `label` is the raw predicate id; the `*_label` fields are display labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub source: String,
    pub target: String,
    pub label: String,
    pub label_label: String,
    pub source_label: String,
    pub target_label: String,
}

/// A node or edge in the live element collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Node { data: NodeData },
    Edge { data: EdgeData },
}

impl Element {
    pub fn node(data: NodeData) -> Self {
        Element::Node { data }
    }

    pub fn edge(data: EdgeData) -> Self {
        Element::Edge { data }
    }

    /// `source` of either variant. Collapse removes by this field.
    pub fn source(&self) -> &str {
        match self {
            Element::Node { data } => &data.source,
            Element::Edge { data } => &data.source,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Element::Node { .. })
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Element::Edge { .. })
    }

    pub fn as_node(&self) -> Option<&NodeData> {
        match self {
            Element::Node { data } => Some(data),
            Element::Edge { .. } => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut NodeData> {
        match self {
            Element::Node { data } => Some(data),
            Element::Edge { .. } => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeData> {
        match self {
            Element::Edge { data } => Some(data),
            Element::Node { .. } => None,
        }
    }
}
