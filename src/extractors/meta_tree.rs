//! Nested Open Graph metadata tree
//!
//! Property paths such as `image:width` are stored as nested objects.
//! Repeated properties at the same path turn into lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Deepest property path, in segments, the tree accepts
pub const MAX_PATH_DEPTH: usize = 64;

/// A single location in the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Object(MetaTree),
    /// Repeated properties; elements are `Text` or `Object`
    List(Vec<MetaValue>),
}

/// String-keyed tree of extracted metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaTree {
    entries: BTreeMap<String, MetaValue>,
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&MetaTree> {
        match self {
            MetaValue::Object(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Resolve this slot to the subtree that intermediate path segments
    /// descend into.
    ///
    /// A scalar is promoted in place to `{ "": scalar }`, and a list
    /// redirects to its most recently appended element.
    fn subtree_mut(&mut self) -> &mut MetaTree {
        match self {
            MetaValue::Object(tree) => tree,
            MetaValue::List(items) => {
                if !matches!(items.last(), Some(MetaValue::Text(_) | MetaValue::Object(_))) {
                    items.push(MetaValue::Object(MetaTree::new()));
                }
                let last = items.len() - 1;
                items[last].subtree_mut()
            }
            MetaValue::Text(text) => {
                let bare = std::mem::take(text);
                *self = MetaValue::Object(MetaTree::with_bare_value(bare));
                self.subtree_mut()
            }
        }
    }
}

impl MetaTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree holding a former scalar under the empty key
    fn with_bare_value(value: String) -> Self {
        let mut tree = Self::new();
        tree.entries.insert(String::new(), MetaValue::Text(value));
        tree
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a colon-delimited path through nested objects.
    ///
    /// Lists are not traversed; `lookup("image:url")` on a list-valued
    /// `image` returns `None`.
    pub fn lookup(&self, path: &str) -> Option<&MetaValue> {
        let mut segments = path.split(':');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Set a top-level key, replacing whatever was there
    pub fn set(&mut self, key: impl Into<String>, value: MetaValue) {
        self.entries.insert(key.into(), value);
    }

    /// Insert `value` along `path`.
    ///
    /// Intermediate segments descend into objects, creating them when absent.
    /// At the final segment an absent key receives the scalar, a list grows
    /// by one, and any other value becomes the list `[old, value]`.
    ///
    /// Paths longer than [`MAX_PATH_DEPTH`] are rejected and leave the tree
    /// untouched; returns whether the value was stored.
    pub fn insert(&mut self, path: &[&str], value: String) -> bool {
        if path.len() > MAX_PATH_DEPTH {
            return false;
        }
        let Some((leaf, parents)) = path.split_last() else {
            return false;
        };

        let mut cursor = self;
        for segment in parents {
            cursor = cursor
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| MetaValue::Object(MetaTree::new()))
                .subtree_mut();
        }
        cursor.insert_leaf(leaf, value);
        true
    }

    fn insert_leaf(&mut self, key: &str, value: String) {
        use std::collections::btree_map::Entry;

        match self.entries.entry(key.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(MetaValue::Text(value));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                MetaValue::List(items) => items.push(MetaValue::Text(value)),
                existing => {
                    let old = std::mem::replace(existing, MetaValue::List(Vec::new()));
                    *existing = MetaValue::List(vec![old, MetaValue::Text(value)]);
                }
            },
        }
    }

    /// Convert to a `serde_json::Value`
    pub fn to_json(&self) -> Value {
        Value::from(self)
    }
}

impl From<&MetaValue> for Value {
    fn from(value: &MetaValue) -> Self {
        match value {
            MetaValue::Text(s) => Value::String(s.clone()),
            MetaValue::Object(tree) => Value::from(tree),
            MetaValue::List(items) => Value::Array(items.iter().map(Value::from).collect()),
        }
    }
}

impl From<&MetaTree> for Value {
    fn from(tree: &MetaTree) -> Self {
        let map: Map<String, Value> = tree
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v)))
            .collect();
        Value::Object(map)
    }
}
