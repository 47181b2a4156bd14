//! The reconciliation pass: defaults-driven tree merge.
//!
//! The merger walks the defaults and user trees together, depth first over
//! the defaults' mapping structure, and rewrites the user tree in place:
//!
//! 1. Keys only the defaults have are copied in verbatim, comments
//!    included — new template keys appear with their documentation.
//! 2. Keys both sides hold as mappings recurse. A structural mismatch
//!    (mapping vs non-mapping, scalar vs sequence) substitutes the defaults
//!    subtree and logs a warning. Matching leaves keep the user's value and
//!    comments untouched.
//! 3. Keys only the user has are pruned unless an ignored route shields
//!    them.
//!
//! Each rebuilt mapping lists the defaults' keys in the defaults' order
//! first, then the surviving user-only keys in their original relative
//! order. The pass is single recursive descent over the defaults tree and
//! is idempotent: a second run against the same defaults changes nothing.

use crate::{
    Document,
    node::{Mapping, Node, Value},
    route::Route,
    update::{IgnoredRoutes, settings::SequencePolicy},
};

/// Reconciles `user` against `defaults` in place.
pub(crate) fn merge(
    user: &mut Document,
    defaults: &Document,
    ignored: &IgnoredRoutes,
    policy: SequencePolicy,
) {
    merge_mapping(user.root_mut(), defaults.root(), &Route::root(), ignored, policy);
}

fn merge_mapping(
    user: &mut Mapping,
    defaults: &Mapping,
    route: &Route,
    ignored: &IgnoredRoutes,
    policy: SequencePolicy,
) {
    let mut remaining = std::mem::take(user);
    let mut rebuilt = Mapping::new();

    for (key, defaults_node) in defaults.iter() {
        let child_route = route.join(key.clone());
        match remaining.remove(key) {
            None => {
                tracing::debug!(route = %child_route, "supplying missing key from defaults");
                rebuilt.insert(key.clone(), defaults_node.clone());
            }
            Some(user_node) => {
                let merged = merge_node(user_node, defaults_node, &child_route, ignored, policy);
                rebuilt.insert(key.clone(), merged);
            }
        }
    }

    for (key, user_node) in remaining {
        let child_route = route.join(key.clone());
        if ignored.covers(&child_route) {
            tracing::debug!(route = %child_route, "retaining ignored user-only key");
            rebuilt.insert(key, user_node);
        } else {
            tracing::debug!(route = %child_route, "pruning obsolete user-only key");
        }
    }

    *user = rebuilt;
}

fn merge_node(
    mut user: Node,
    defaults: &Node,
    route: &Route,
    ignored: &IgnoredRoutes,
    policy: SequencePolicy,
) -> Node {
    match (user.value_mut(), defaults.value()) {
        (Value::Mapping(user_map), Value::Mapping(defaults_map)) => {
            merge_mapping(user_map, defaults_map, route, ignored, policy);
        }
        (Value::Sequence(user_seq), Value::Sequence(defaults_seq)) => {
            if policy == SequencePolicy::Elementwise {
                merge_sequence(user_seq, defaults_seq, route, ignored, policy);
            }
        }
        (Value::Scalar(_), Value::Scalar(_)) => {}
        (user_value, defaults_value) => {
            tracing::warn!(
                route = %route,
                user = user_value.type_name(),
                defaults = defaults_value.type_name(),
                "structural conflict, substituting defaults subtree"
            );
            return defaults.clone();
        }
    }
    user
}

fn merge_sequence(
    user: &mut Vec<Node>,
    defaults: &[Node],
    route: &Route,
    ignored: &IgnoredRoutes,
    policy: SequencePolicy,
) {
    let existing = std::mem::take(user);
    let mut rebuilt = Vec::with_capacity(defaults.len());
    let mut existing_iter = existing.into_iter();

    for (index, defaults_node) in defaults.iter().enumerate() {
        let element_route = route.join(index);
        match existing_iter.next() {
            None => {
                tracing::debug!(route = %element_route, "supplying missing sequence element from defaults");
                rebuilt.push(defaults_node.clone());
            }
            Some(user_node) => {
                rebuilt.push(merge_node(user_node, defaults_node, &element_route, ignored, policy));
            }
        }
    }

    for (offset, user_node) in existing_iter.enumerate() {
        let element_route = route.join(defaults.len() + offset);
        if ignored.covers(&element_route) {
            tracing::debug!(route = %element_route, "retaining ignored sequence element");
            rebuilt.push(user_node);
        } else {
            tracing::debug!(route = %element_route, "pruning trailing sequence element");
        }
    }

    *user = rebuilt;
}
