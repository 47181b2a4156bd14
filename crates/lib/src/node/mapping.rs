//! Insertion-ordered mappings.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Node;
use crate::route::Key;

/// An ordered collection of unique [`Key`] → [`Node`] pairs.
///
/// Insertion order is preserved and is significant: it is what the emitter
/// writes back to disk and what the update engine reorders against the
/// defaults document. Removal keeps the relative order of the remaining
/// entries.
///
/// The serde representation is an ordered sequence of `(key, node)` pairs
/// rather than a map, since keys are typed values and most wire formats
/// only allow string map keys. This is an internal persistence form; the
/// human-facing document format is a [`Codec`](crate::codec::Codec)
/// concern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: IndexMap<Key, Node>,
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(Key, Node)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

impl Mapping {
    /// Creates a new empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the node stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Returns a mutable reference to the node stored under `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    /// Returns true if the mapping contains `key`.
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a node under `key`, returning the previous node if the key
    /// was already present. An existing key keeps its position; a new key is
    /// appended at the end.
    pub fn insert(&mut self, key: impl Into<Key>, node: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), node.into())
    }

    /// Removes the entry under `key`, preserving the order of the remaining
    /// entries, and returns the removed node if it was present.
    pub fn remove(&mut self, key: &Key) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    /// Returns an iterator over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Node)> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over the entries in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Node)> {
        self.entries.iter_mut()
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.values()
    }

    /// Builder method to insert an entry and return self.
    pub fn with(mut self, key: impl Into<Key>, node: impl Into<Node>) -> Self {
        self.insert(key, node);
        self
    }
}

impl IntoIterator for Mapping {
    type Item = (Key, Node);
    type IntoIter = indexmap::map::IntoIter<Key, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a Key, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, Key, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(Key, Node)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (Key, Node)>>(iter: T) -> Self {
        Mapping {
            entries: iter.into_iter().collect(),
        }
    }
}
