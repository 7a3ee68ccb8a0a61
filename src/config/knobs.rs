//! Thread-safe settings ("knobs") storage.
//!
//! Knobs are nested tables keyed by command path segments, with argument
//! names at the leaves:
//!
//! ```toml
//! x = 3
//!
//! [test]
//! y = 4
//! ```
//!
//! The resolver only ever reads from the store. Writes come from
//! collaborators such as a `set` command's action.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value as Json};

use crate::args::Value;
use crate::config::loader::ConfigError;

/// Shared handle over the settings tree. Clones share the same tree.
#[derive(Clone, Debug)]
pub struct KnobStore {
    inner: Arc<RwLock<Json>>,
}

impl Default for KnobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KnobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::from_json(Json::Object(Map::new()))
    }

    /// Create a store over an existing JSON tree.
    pub fn from_json(tree: Json) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Parse a TOML document into a store.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let tree: Json = toml::from_str(content)?;
        Ok(Self::from_json(tree))
    }

    /// Load a store from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Look up `name` under the table addressed by `path`.
    ///
    /// - `None`: some segment of `path` is not a table in the store.
    /// - `Some(None)`: the table exists but `name` is unset.
    /// - `Some(Some(v))`: the bound value.
    pub fn lookup(&self, path: &[String], name: &str) -> Option<Option<Value>> {
        let guard = self.inner.read();
        let mut thumb = &*guard;
        for segment in path {
            thumb = thumb.as_object()?.get(segment)?;
        }
        let table = thumb.as_object()?;
        Some(table.get(name).and_then(Value::from_json))
    }

    /// Write `value` at `path`/`name`, creating intermediate tables.
    pub fn set(&self, path: &[String], name: &str, value: Json) {
        let mut guard = self.inner.write();
        let mut thumb = &mut *guard;
        for segment in path {
            if !thumb.is_object() {
                *thumb = Json::Object(Map::new());
            }
            let Json::Object(table) = thumb else {
                return;
            };
            thumb = table
                .entry(segment.clone())
                .or_insert_with(|| Json::Object(Map::new()));
        }
        if !thumb.is_object() {
            *thumb = Json::Object(Map::new());
        }
        if let Json::Object(table) = thumb {
            table.insert(name.to_string(), value);
        }
    }

    /// Clone of the current tree.
    pub fn snapshot(&self) -> Json {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn lookup_distinguishes_missing_path_from_unset_name() {
        let store = KnobStore::from_toml_str("x = 3\n[test]\ny = 4\n").unwrap();
        assert_eq!(store.lookup(&[], "x"), Some(Some(Value::Int(3))));
        assert_eq!(store.lookup(&path(&["test"]), "y"), Some(Some(Value::Int(4))));
        assert_eq!(store.lookup(&path(&["test"]), "z"), Some(None));
        assert_eq!(store.lookup(&path(&["other"]), "y"), None);
    }

    #[test]
    fn set_creates_tables_and_is_shared_between_clones() {
        let store = KnobStore::new();
        let reader = store.clone();
        store.set(&path(&["a", "b"]), "c", serde_json::json!("on"));
        assert_eq!(
            reader.lookup(&path(&["a", "b"]), "c"),
            Some(Some(Value::Text("on".into())))
        );
    }
}
