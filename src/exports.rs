use indexmap::IndexMap;
use serde::Deserialize;

/// Exports of a CSS module: original selector -> scoped (compiled) selector.
///
/// Keys are unique and iteration follows insertion order, which is also the
/// order the rewritten object literal lists its properties in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CssModuleExports {
    entries: IndexMap<String, String>,
}

impl CssModuleExports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a selector. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, selector: impl Into<String>, scoped: impl Into<String>) {
        self.entries.insert(selector.into(), scoped.into());
    }

    pub fn get(&self, selector: &str) -> Option<&str> {
        self.entries.get(selector).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CssModuleExports {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
