//! Element construction from parsed triples and neighbour tables.
//!
//! Display labels are looked up in the [`LabelIndex`] here, at construction
//! time, never at parse time.

use serde::{Deserialize, Serialize};

use crate::index::LabelIndex;
use crate::model::{EdgeData, Element, NodeData, Table, Value};
use crate::triples::ParsedTriples;
use crate::Result;

/// Column names of a neighbour-query table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborColumns {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub object_label: String,
    pub predicate_label: String,
}

impl Default for NeighborColumns {
    fn default() -> Self {
        Self {
            subject: "s".into(),
            predicate: "p".into(),
            object: "obj".into(),
            object_label: "obj_label".into(),
            predicate_label: "p_label".into(),
        }
    }
}

/// One `(s, p, obj)` row of a neighbour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborRow {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// Full graph from one parse: nodes first, then edges.
pub fn create_graph(parsed: &ParsedTriples, root: &str, labels: &LabelIndex) -> Vec<Element> {
    let nodes = parsed.nodes.iter().map(|id| {
        Element::node(NodeData {
            id: id.clone(),
            label: labels.resolve(id),
            expanded: false,
            source: root.to_owned(),
        })
    });
    let edges = parsed
        .edges
        .iter()
        .map(|t| edge(&t.subject, &t.predicate, &t.object, labels));
    nodes.chain(edges).collect()
}

fn edge(subject: &str, predicate: &str, object: &str, labels: &LabelIndex) -> Element {
    Element::edge(EdgeData {
        source: subject.to_owned(),
        target: object.to_owned(),
        label: predicate.to_owned(),
        label_label: labels.resolve(predicate),
        source_label: labels.resolve(subject),
        target_label: labels.resolve(object),
    })
}

/// Text of an id cell; missing cells yield `None`.
fn id_text(value: &Value) -> Option<String> {
    if value.is_missing() {
        return None;
    }
    Some(value.to_string())
}

/// Non-empty label text from a string-typed cell only.
fn label_text(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Extract `(s, p, obj)` rows. Rows with any missing id are skipped.
pub fn neighbor_rows(table: &Table, columns: &NeighborColumns) -> Result<Vec<NeighborRow>> {
    let s = table.require(&columns.subject)?;
    let p = table.require(&columns.predicate)?;
    let o = table.require(&columns.object)?;
    let rows = (0..table.num_rows())
        .filter_map(|i| {
            Some(NeighborRow {
                subject: id_text(&s.values[i])?,
                predicate: id_text(&p.values[i])?,
                object: id_text(&o.values[i])?,
            })
        })
        .collect();
    Ok(rows)
}

/// Label entries from the object-label and predicate-label columns.
///
/// Only generic (string) columns contribute; a label column that decoded as a
/// scalar type is never treated as labels. Absent label columns are skipped.
pub fn neighbor_labels(table: &Table, columns: &NeighborColumns) -> Result<Vec<(String, String)>> {
    let mut updates = Vec::new();
    let pairs = [
        (&columns.object, &columns.object_label),
        (&columns.predicate, &columns.predicate_label),
    ];
    for (id_column, label_column) in pairs {
        let Some(labels) = table.column(label_column) else { continue };
        if !labels.column_type.is_generic() {
            continue;
        }
        let ids = table.require(id_column)?;
        for (id, label) in ids.values.iter().zip(&labels.values) {
            if let (Some(id), Some(label)) = (id_text(id), label_text(label)) {
                updates.push((id, label.to_owned()));
            }
        }
    }
    Ok(updates)
}

pub(crate) fn nodes_for(rows: &[NeighborRow], source: &str, labels: &LabelIndex) -> Vec<Element> {
    let mut nodes: Vec<Element> = Vec::new();
    for row in rows {
        let node = Element::node(NodeData {
            id: row.object.clone(),
            label: labels.resolve(&row.object),
            expanded: false,
            source: source.to_owned(),
        });
        if !nodes.contains(&node) {
            nodes.push(node);
        }
    }
    nodes
}

pub(crate) fn edges_for(rows: &[NeighborRow], labels: &LabelIndex) -> Vec<Element> {
    let mut edges: Vec<Element> = Vec::new();
    for row in rows {
        let e = edge(&row.subject, &row.predicate, &row.object, labels);
        if !edges.contains(&e) {
            edges.push(e);
        }
    }
    edges
}

/// Candidate nodes for a neighbour table, one per distinct object.
pub fn generate_nodes(
    table: &Table,
    source: &str,
    columns: &NeighborColumns,
    labels: &LabelIndex,
) -> Result<Vec<Element>> {
    Ok(nodes_for(&neighbor_rows(table, columns)?, source, labels))
}

/// Candidate edges for a neighbour table, one per distinct `(s, p, obj)`.
pub fn generate_edges(table: &Table, columns: &NeighborColumns, labels: &LabelIndex) -> Result<Vec<Element>> {
    Ok(edges_for(&neighbor_rows(table, columns)?, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnType, Triple};
    use pretty_assertions::assert_eq;

    fn neighbor_table(label_type: ColumnType, label_values: Vec<Value>) -> Table {
        let text = |v: &[&str]| v.iter().map(|s| Value::from(*s)).collect::<Vec<_>>();
        Table::new(
            vec![
                Column::new("s", ColumnType::Generic, text(&["<a>", "<a>", "<a>"])),
                Column::new("p", ColumnType::Generic, text(&["<route>", "<route>", "<route>"])),
                Column::new("obj", ColumnType::Generic, text(&["<b>", "<c>", "<b>"])),
                Column::new("obj_label", label_type, label_values),
            ],
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_create_graph_labels_and_fallbacks() {
        let parsed = ParsedTriples {
            nodes: vec!["<a>".into(), "<b>".into()],
            edges: vec![Triple::new("<a>", "<p>", "<b>")],
            ..ParsedTriples::default()
        };
        let mut labels = LabelIndex::new();
        labels.insert("<a>", "A");
        labels.insert("<p>", "p");

        let elements = create_graph(&parsed, "<root>", &labels);
        assert_eq!(elements.len(), 3);
        let a = elements[0].as_node().unwrap();
        assert_eq!((a.label.as_str(), a.source.as_str(), a.expanded), ("A", "<root>", false));
        assert_eq!(elements[1].as_node().unwrap().label, "<b>");
        let e = elements[2].as_edge().unwrap();
        assert_eq!(e.label_label, "p");
        assert_eq!(e.source_label, "A");
        assert_eq!(e.target_label, "<b>");
    }

    #[test]
    fn test_generate_dedups_within_batch() {
        let table = neighbor_table(ColumnType::Generic, vec![Value::Null; 3]);
        let labels = LabelIndex::new();
        let cols = NeighborColumns::default();
        assert_eq!(generate_nodes(&table, "<a>", &cols, &labels).unwrap().len(), 2);
        assert_eq!(generate_edges(&table, &cols, &labels).unwrap().len(), 2);
    }

    #[test]
    fn test_string_labels_collected() {
        let table = neighbor_table(
            ColumnType::Generic,
            vec![Value::from("B"), Value::from(""), Value::Null],
        );
        let updates = neighbor_labels(&table, &NeighborColumns::default()).unwrap();
        assert_eq!(updates, vec![("<b>".to_owned(), "B".to_owned())]);
    }

    #[test]
    fn test_predicate_labels_reach_edges() {
        let mut table = neighbor_table(ColumnType::Generic, vec![Value::Null; 3]);
        let p_label = Column::new(
            "p_label",
            ColumnType::Generic,
            vec![Value::from("hasRouteTo"), Value::from("hasRouteTo"), Value::Null],
        );
        let mut columns = table.columns().to_vec();
        columns.push(p_label);
        table = Table::new(columns, 3).unwrap();

        let cols = NeighborColumns::default();
        let updates = neighbor_labels(&table, &cols).unwrap();
        assert_eq!(
            updates,
            vec![
                ("<route>".to_owned(), "hasRouteTo".to_owned()),
                ("<route>".to_owned(), "hasRouteTo".to_owned()),
            ]
        );

        let mut labels = LabelIndex::new();
        labels.extend(updates);
        let edges = generate_edges(&table, &cols, &labels).unwrap();
        for e in &edges {
            let e = e.as_edge().unwrap();
            assert_eq!(e.label, "<route>");
            assert_eq!(e.label_label, "hasRouteTo");
        }
    }

    #[test]
    fn test_numeric_label_column_ignored() {
        let table = neighbor_table(ColumnType::Integer, vec![Value::Int(1), Value::NAN, Value::Int(3)]);
        let updates = neighbor_labels(&table, &NeighborColumns::default()).unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn test_missing_object_column_is_an_error() {
        let table = Table::new(vec![Column::new("s", ColumnType::Generic, vec![])], 0).unwrap();
        let r = generate_nodes(&table, "<a>", &NeighborColumns::default(), &LabelIndex::new());
        assert!(matches!(r, Err(crate::Error::MissingColumn(c)) if c == "p"));
    }
}
