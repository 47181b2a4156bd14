//! The document root and route-addressed tree operations.
//!
//! [`Document`] owns the root [`Mapping`] of a configuration document and
//! exposes the tree operations the update engine is built from: resolving a
//! [`Route`] to a node, setting through a route (creating intermediate
//! mappings as needed), removal, and comment access. Resolution never fails
//! with an error — a route that leads nowhere resolves to absent.

use thiserror::Error;

use crate::{
    node::{CommentPlacement, Mapping, Node, Value},
    route::Route,
    section::Section,
    update::{self, UpdateOutcome, UpdateSettings},
};

/// Error type for tree mutation failures.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// The root route cannot be written to; it addresses the document
    /// itself, not a node within it.
    #[error("the root route does not address a writable node")]
    RootRoute,
}

impl From<TreeError> for crate::Error {
    fn from(err: TreeError) -> Self {
        crate::Error::Tree(err)
    }
}

/// An owned, mutable configuration document.
///
/// A document is created by a parser collaborator at load time, mutated in
/// place by an update pass, and handed back to the persistence collaborator
/// for serialization. Defaults documents are only ever read.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Document {
    root: Mapping,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from an existing root mapping.
    pub fn from_mapping(root: Mapping) -> Self {
        Document { root }
    }

    /// Returns the root mapping.
    pub fn root(&self) -> &Mapping {
        &self.root
    }

    /// Returns a mutable reference to the root mapping.
    pub fn root_mut(&mut self) -> &mut Mapping {
        &mut self.root
    }

    /// Resolves `route` to a node by sequential descent.
    ///
    /// Returns `None` if any intermediate node is missing or is not a
    /// mapping, and for the root route (the root is a mapping, not a node).
    pub fn get(&self, route: &Route) -> Option<&Node> {
        let (first, rest) = route.as_slice().split_first()?;
        let mut node = self.root.get(first)?;
        for key in rest {
            node = node.as_mapping()?.get(key)?;
        }
        Some(node)
    }

    /// Resolves `route` to a mutable node reference.
    pub fn get_mut(&mut self, route: &Route) -> Option<&mut Node> {
        let (first, rest) = route.as_slice().split_first()?;
        let mut node = self.root.get_mut(first)?;
        for key in rest {
            node = node.as_mapping_mut()?.get_mut(key)?;
        }
        Some(node)
    }

    /// Returns true if `route` resolves to a node.
    pub fn contains(&self, route: &Route) -> bool {
        self.get(route).is_some()
    }

    /// Sets `node` at `route`, creating intermediate mappings as needed, and
    /// returns the node previously stored there.
    ///
    /// An intermediate route segment that currently holds a non-mapping node
    /// is replaced with a new empty mapping, discarding the old value. This
    /// override is deliberate: a route write declares the full shape of its
    /// ancestry.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::RootRoute`] for the empty route.
    pub fn set(&mut self, route: &Route, node: impl Into<Node>) -> Result<Option<Node>, TreeError> {
        let (last, parents) = route.as_slice().split_last().ok_or(TreeError::RootRoute)?;

        let mut current = &mut self.root;
        for key in parents {
            if !current.contains_key(key) {
                current.insert(key.clone(), Node::from(Mapping::new()));
            }
            let entry = match current.get_mut(key) {
                Some(entry) => entry,
                None => unreachable!(),
            };
            if !entry.is_mapping() {
                tracing::debug!(key = %key, "replacing non-mapping node with an empty mapping");
                *entry = Node::from(Mapping::new());
            }
            current = match entry.as_mapping_mut() {
                Some(mapping) => mapping,
                None => unreachable!(),
            };
        }

        Ok(current.insert(last.clone(), node.into()))
    }

    /// Removes the node at `route`, preserving the order of its siblings,
    /// and returns it if it was present. Removing an absent route is a
    /// no-op.
    pub fn remove(&mut self, route: &Route) -> Option<Node> {
        let (last, parents) = route.as_slice().split_last()?;
        let mut current = &mut self.root;
        for key in parents {
            current = current.get_mut(key)?.as_mapping_mut()?;
        }
        current.remove(last)
    }

    /// Returns the comment at `placement` of the node at `route`.
    pub fn comment(&self, route: &Route, placement: CommentPlacement) -> Option<&str> {
        self.get(route)?.comment(placement)
    }

    /// Sets the comment at `placement` of the node at `route`. Returns
    /// false if the route does not resolve.
    pub fn set_comment(
        &mut self,
        route: &Route,
        placement: CommentPlacement,
        text: impl Into<String>,
    ) -> bool {
        match self.get_mut(route) {
            Some(node) => {
                node.set_comment(placement, text);
                true
            }
            None => false,
        }
    }

    /// Returns the section handle for the document root.
    pub fn root_section(&self) -> Section<'_> {
        Section::new(&self.root, Route::root())
    }

    /// Returns a section handle over the mapping node at `route`, or `None`
    /// if the route does not resolve to a mapping.
    pub fn section(&self, route: &Route) -> Option<Section<'_>> {
        if route.is_empty() {
            return Some(self.root_section());
        }
        let mapping = self.get(route)?.as_mapping()?;
        Some(Section::new(mapping, route.clone()))
    }

    /// Reconciles this document against `defaults` per `settings`,
    /// delegating to the update engine. The document is mutated in place;
    /// `defaults` is never modified.
    pub fn update(
        &mut self,
        defaults: &Document,
        settings: &UpdateSettings,
    ) -> crate::Result<UpdateOutcome> {
        update::update(self, defaults, settings)
    }

    /// Iterates over every route in the document that resolves to a node,
    /// in depth-first document order.
    pub fn routes(&self) -> Vec<Route> {
        let mut out = Vec::new();
        collect_routes(&self.root, &Route::root(), &mut out);
        out
    }
}

fn collect_routes(mapping: &Mapping, base: &Route, out: &mut Vec<Route>) {
    for (key, node) in mapping.iter() {
        let route = base.join(key.clone());
        out.push(route.clone());
        if let Value::Mapping(child) = node.value() {
            collect_routes(child, &route, out);
        }
    }
}
