//! RDF statement as read from the flat triple serialization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(subject, predicate, object)` statement, tokens kept verbatim.
///
/// Entity tokens keep their angle brackets; literal objects keep their quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self { subject: subject.into(), predicate: predicate.into(), object: object.into() }
    }

    /// Object is an entity reference (`<...>`), so the statement draws an edge.
    pub fn has_entity_object(&self) -> bool {
        is_entity_ref(&self.object)
    }

    /// Predicate's last path segment contains `label` (`rdfs:label`, `skos:prefLabel`, ...).
    pub fn is_label(&self) -> bool {
        let tail = self.predicate.rsplit('/').next().unwrap_or(&self.predicate);
        tail.strip_suffix('>').unwrap_or(tail).contains("label")
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// Angle-bracket quoted token.
pub fn is_entity_ref(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('<') && token.ends_with('>')
}

/// Strip the quoting from an object token: `"Boston"@en` → `Boston`, `<x>` → `x`.
pub fn unquote(token: &str) -> &str {
    if let Some(rest) = token.strip_prefix('"') {
        if let Some(end) = rest.rfind('"') {
            return &rest[..end];
        }
        return rest;
    }
    if is_entity_ref(token) {
        return &token[1..token.len() - 1];
    }
    token
}
