//! # Triple Parser
//!
//! Raw triple-set text (the body of a CONSTRUCT/DESCRIBE response) → deduplicated
//! triples, label entries, and the node/edge split used by the graph materializer.
//! Pure functions — labels are returned, not written, unless [`parse_into`] is used.

pub mod lexer;

use hashbrown::HashSet;
use tracing::debug;

use crate::index::LabelIndex;
use crate::model::triple::unquote;
use crate::model::Triple;
use crate::Result;

/// Output of one parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTriples {
    /// Distinct statements in first-seen order.
    pub triples: Vec<Triple>,
    /// `(lower(subject), label)` from every label statement, in statement order.
    pub labels: Vec<(String, String)>,
    /// Drawable node ids: subjects and entity objects, minus ids used as edge predicates.
    pub nodes: Vec<String>,
    /// Statements whose object is an entity reference.
    pub edges: Vec<Triple>,
}

/// Parse raw triple text. A malformed record fails the whole batch.
pub fn parse(text: &str) -> Result<ParsedTriples> {
    let mut seen = HashSet::new();
    let mut triples = Vec::new();
    for record in lexer::statements(text) {
        let tokens = lexer::tokenize(record)?;
        let triple = Triple::new(tokens[0], tokens[1], tokens[2]);
        if seen.insert(triple.clone()) {
            triples.push(triple);
        }
    }

    // Pass one: every label statement, before any label is looked up.
    let labels: Vec<(String, String)> = triples
        .iter()
        .filter(|t| t.is_label())
        .map(|t| (t.subject.to_lowercase(), unquote(&t.object).to_owned()))
        .collect();

    // Pass two: node candidates, edges, and predicates used as edges.
    let (nodes, edges) = {
        let mut candidates: Vec<&str> = Vec::new();
        let mut candidate_set: HashSet<&str> = HashSet::new();
        let mut edge_predicates: HashSet<&str> = HashSet::new();
        let mut edges = Vec::new();
        for t in &triples {
            if candidate_set.insert(&t.subject) {
                candidates.push(&t.subject);
            }
            if t.has_entity_object() {
                if candidate_set.insert(&t.object) {
                    candidates.push(&t.object);
                }
                edge_predicates.insert(&t.predicate);
                edges.push(t.clone());
            }
        }

        let nodes: Vec<String> = candidates
            .into_iter()
            .filter(|id| !edge_predicates.contains(id))
            .map(str::to_owned)
            .collect();
        (nodes, edges)
    };

    debug!(
        triples = triples.len(),
        labels = labels.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "triples parsed"
    );
    Ok(ParsedTriples { triples, labels, nodes, edges })
}

/// Parse and register the discovered labels. The index is untouched on error.
pub fn parse_into(text: &str, labels: &mut LabelIndex) -> Result<ParsedTriples> {
    let parsed = parse(text)?;
    labels.extend(parsed.labels.iter().map(|(id, label)| (id, label.clone())));
    Ok(parsed)
}
