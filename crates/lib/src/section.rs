//! Section handles over mapping nodes.

use crate::{
    node::{Mapping, Node},
    route::{Key, Route},
};

/// A read-only handle over one mapping node of a document, together with the
/// route that leads to it.
///
/// A section does not hold a live back-pointer to its parent; it is a
/// (mapping, route) pair, and routes to children are reconstructed on
/// demand. Sections borrow the document and are cheap to produce.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    mapping: &'a Mapping,
    route: Route,
}

impl<'a> Section<'a> {
    pub(crate) fn new(mapping: &'a Mapping, route: Route) -> Self {
        Section { mapping, route }
    }

    /// Returns the route of this section from the document root. The root
    /// section's route is empty.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns the underlying mapping.
    pub fn mapping(&self) -> &'a Mapping {
        self.mapping
    }

    /// Returns the absolute route of a key within this section.
    pub fn route_to(&self, key: impl Into<Key>) -> Route {
        self.route.join(key)
    }

    /// Returns the node stored under `key` in this section.
    pub fn get(&self, key: impl Into<Key>) -> Option<&'a Node> {
        self.mapping.get(&key.into())
    }

    /// Returns the child section under `key`, if that key holds a mapping.
    pub fn section(&self, key: impl Into<Key>) -> Option<Section<'a>> {
        let key = key.into();
        let mapping = self.mapping.get(&key)?.as_mapping()?;
        Some(Section::new(mapping, self.route.join(key)))
    }

    /// Returns the number of entries in this section.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Returns true if this section has no entries.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Returns an iterator over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Key, &'a Node)> {
        self.mapping.iter()
    }
}
