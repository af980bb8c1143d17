//! Ordered key sets used while computing which children a traversal visits.

use indexmap::IndexSet;

/// An insertion-ordered set of string keys.
///
/// Iteration order is the order keys were first inserted, which keeps tree
/// traversals deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: IndexSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from a sequence of keys. Duplicates collapse.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.keys.iter().map(String::as_str).collect()
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the keys of `other` that are not in `self` (relative
    /// complement `other \ self`), in `other`'s order.
    ///
    /// # Example
    ///
    /// ```
    /// use treequery::document::key_set::KeySet;
    ///
    /// let matched = KeySet::from_keys(["b"]);
    /// let all = KeySet::from_keys(["a", "b", "c"]);
    /// assert_eq!(matched.subtract_from(&all).keys(), vec!["a", "c"]);
    /// ```
    pub fn subtract_from(&self, other: &KeySet) -> KeySet {
        KeySet {
            keys: other
                .keys
                .iter()
                .filter(|key| !self.keys.contains(key.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeySet::from_keys(iter)
    }
}
