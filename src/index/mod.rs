//! Label index: entity id → human-readable label.
//!
//! Keys are lower-cased on write and on lookup. Entries are only ever added or
//! overwritten; the index lives as long as its session.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelIndex {
    labels: HashMap<String, String>,
}

impl LabelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label. Last write wins.
    pub fn insert(&mut self, id: &str, label: impl Into<String>) {
        self.labels.insert(id.to_lowercase(), label.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.labels.get(&id.to_lowercase()).map(String::as_str)
    }

    /// Display label for `id`, falling back to the id itself.
    pub fn resolve(&self, id: &str) -> String {
        self.get(id).unwrap_or(id).to_owned()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: Into<String>> Extend<(K, V)> for LabelIndex {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (id, label) in iter {
            self.insert(id.as_ref(), label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_keys() {
        let mut idx = LabelIndex::new();
        idx.insert("<HTTP://Ex.org/BOS>", "BOS");
        assert_eq!(idx.get("<http://ex.org/bos>"), Some("BOS"));
        assert_eq!(idx.resolve("<http://EX.org/bos>"), "BOS");
    }

    #[test]
    fn test_resolve_falls_back_to_id() {
        let idx = LabelIndex::new();
        assert_eq!(idx.resolve("<http://a>"), "<http://a>");
    }

    #[test]
    fn test_last_write_wins() {
        let mut idx = LabelIndex::new();
        idx.extend([("<a>", "first"), ("<A>", "second")]);
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.get("<a>"), Some("second"));
    }
}
