//! Route relocation within one version transition.

use std::collections::HashSet;

use crate::{Document, route::Route, update::settings::Relocation};

/// Applies one transition's relocations to `document` in declaration order.
///
/// Each relocation detaches the node at its source route — value and
/// comments together — and re-attaches it at its target route, creating
/// intermediate mappings as needed. An absent source is a no-op. A target
/// already holding a node is overwritten; when two relocations in the same
/// transition share a target, the last one wins.
pub(crate) fn apply(document: &mut Document, relocations: &[Relocation]) -> crate::Result<()> {
    let mut targets: HashSet<&Route> = HashSet::new();
    for relocation in relocations {
        if !targets.insert(relocation.to_route()) {
            tracing::warn!(
                route = %relocation.to_route(),
                "multiple relocations target the same route, last wins"
            );
        }

        let Some(node) = document.remove(relocation.from_route()) else {
            tracing::debug!(route = %relocation.from_route(), "relocation source absent, skipping");
            continue;
        };

        tracing::debug!(
            from = %relocation.from_route(),
            to = %relocation.to_route(),
            "relocating route"
        );
        document.set(relocation.to_route(), node)?;
    }
    Ok(())
}
