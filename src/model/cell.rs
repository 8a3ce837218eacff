//! SPARQL 1.1 JSON results document and the per-cell variant decoded from it.
//!
//! Wire shape (<https://www.w3.org/TR/sparql11-results-json/>):
//!
//! ```text
//! { "head": { "vars": ["s", "p"] },
//!   "results": { "bindings": [ { "s": { "type": "uri", "value": "http://a" } } ] } }
//! ```
//!
//! Unbound variables are simply absent from a binding object.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A parsed SPARQL JSON results document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub head: Head,
    #[serde(default)]
    pub results: Results,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Head {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One result row: variable name → cell.
pub type Binding = HashMap<String, RawCell>;

/// A bound cell exactly as it appears on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl RawCell {
    pub fn uri(value: impl Into<String>) -> Self {
        Self { kind: "uri".into(), value: value.into(), ..Self::default() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self { kind: "literal".into(), value: value.into(), ..Self::default() }
    }

    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        Self { lang: Some(lang.into()), ..Self::literal(value) }
    }

    pub fn typed_literal(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            kind: "typed-literal".into(),
            value: value.into(),
            datatype: Some(datatype.into()),
            ..Self::default()
        }
    }
}

impl ResultSet {
    /// Parse a results document from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn vars(&self) -> &[String] {
        &self.head.vars
    }

    pub fn rows(&self) -> &[Binding] {
        &self.results.bindings
    }
}

/// A cell classified once by its wire metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Unbound,
    EntityRef(&'a str),
    LangLiteral { value: &'a str, lang: &'a str },
    TypedLiteral { value: &'a str, datatype: &'a str },
    PlainLiteral(&'a str),
}

impl<'a> Cell<'a> {
    /// Classify a possibly-absent wire cell. Empty language tags and datatypes count as absent.
    pub fn classify(raw: Option<&'a RawCell>) -> Self {
        let Some(raw) = raw else {
            return Cell::Unbound;
        };
        if raw.kind == "uri" {
            return Cell::EntityRef(&raw.value);
        }
        match (non_empty(&raw.lang), non_empty(&raw.datatype)) {
            (Some(lang), _) => Cell::LangLiteral { value: &raw.value, lang },
            (None, Some(datatype)) => Cell::TypedLiteral { value: &raw.value, datatype },
            (None, None) => Cell::PlainLiteral(&raw.value),
        }
    }

    pub fn is_unbound(&self) -> bool {
        matches!(self, Cell::Unbound)
    }

    /// Textual rendering used by generic columns. `None` for unbound cells.
    pub fn text(&self) -> Option<String> {
        match *self {
            Cell::Unbound => None,
            Cell::EntityRef(v) => Some(format!("<{v}>")),
            Cell::LangLiteral { value, lang } => Some(format!("\"{value}\"@{lang}")),
            Cell::TypedLiteral { value, .. } | Cell::PlainLiteral(value) => Some(value.to_owned()),
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_results_document() {
        let doc = br#"{
            "head": {"vars": ["s", "label"]},
            "results": {"bindings": [
                {"s": {"type": "uri", "value": "http://a"},
                 "label": {"type": "literal", "value": "A", "xml:lang": "en"}},
                {"s": {"type": "uri", "value": "http://b"}}
            ]}
        }"#;
        let rs = ResultSet::from_slice(doc).unwrap();
        assert_eq!(rs.vars(), ["s", "label"]);
        assert_eq!(rs.rows().len(), 2);
        assert_eq!(rs.rows()[0]["label"].lang.as_deref(), Some("en"));
        assert!(rs.rows()[1].get("label").is_none());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let rs = ResultSet::from_slice(b"{}").unwrap();
        assert!(rs.vars().is_empty());
        assert!(rs.rows().is_empty());
    }

    #[test]
    fn test_classify_priority() {
        let uri = RawCell { datatype: Some("x".into()), ..RawCell::uri("http://a") };
        assert_eq!(Cell::classify(Some(&uri)), Cell::EntityRef("http://a"));

        let both = RawCell {
            lang: Some("en".into()),
            ..RawCell::typed_literal("5", "http://www.w3.org/2001/XMLSchema#integer")
        };
        assert!(matches!(Cell::classify(Some(&both)), Cell::LangLiteral { lang: "en", .. }));

        let empty_lang = RawCell { lang: Some(String::new()), ..RawCell::literal("x") };
        assert_eq!(Cell::classify(Some(&empty_lang)), Cell::PlainLiteral("x"));
        assert_eq!(Cell::classify(None), Cell::Unbound);
    }

    #[test]
    fn test_text_forms() {
        assert_eq!(Cell::EntityRef("http://a").text().as_deref(), Some("<http://a>"));
        let lang = Cell::LangLiteral { value: "Boston", lang: "en" };
        assert_eq!(lang.text().as_deref(), Some("\"Boston\"@en"));
        assert_eq!(Cell::Unbound.text(), None);
    }
}
