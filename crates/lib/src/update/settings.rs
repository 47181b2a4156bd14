//! Update settings: immutable configuration for an update pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    route::Route,
    version::{Pattern, Version},
};

/// How sequences present in both documents are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencePolicy {
    /// A sequence is a leaf: the user's sequence is kept untouched.
    #[default]
    Atomic,
    /// Sequences are merged positionally, element by element.
    Elementwise,
}

/// What to do when the user document's version is ahead of the defaults'.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionAheadPolicy {
    /// Fail the update pass. A document from the future usually means a
    /// downgraded installation, and merging against older defaults would
    /// prune keys the newer format legitimately added.
    #[default]
    Fail,
    /// Leave the document untouched and skip the update pass.
    SkipUpdate,
}

/// A declared move of one route to another, scoped to a single version
/// transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    from: Route,
    to: Route,
}

impl Relocation {
    /// Declares that the node at `from` moves to `to`.
    pub fn new(from: impl Into<Route>, to: impl Into<Route>) -> Self {
        Relocation {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The route the node is moved away from.
    pub fn from_route(&self) -> &Route {
        &self.from
    }

    /// The route the node is moved to.
    pub fn to_route(&self) -> &Route {
        &self.to
    }
}

/// Versioning configuration: where the marker lives and what shape it has.
#[derive(Debug, Clone)]
pub struct Versioning {
    route: Route,
    pattern: Pattern,
}

impl Versioning {
    /// Creates a versioning configuration.
    pub fn new(route: impl Into<Route>, pattern: Pattern) -> Self {
        Versioning {
            route: route.into(),
            pattern,
        }
    }

    /// The route of the version marker inside a document.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The pattern version markers are parsed against.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// Immutable configuration of an update pass.
///
/// Settings are value objects: constructed once via [`UpdateSettings::versioned`]
/// or [`UpdateSettings::unversioned`], refined with the consuming `with_*`
/// methods, and then shared freely.
///
/// ```
/// use upkeep::{
///     route,
///     update::{Relocation, UpdateSettings},
///     version::Pattern,
/// };
///
/// let pattern = Pattern::integer();
/// let v2 = pattern.parse("2").unwrap();
/// let settings = UpdateSettings::versioned(route!["config-version"], pattern)
///     .with_relocations(v2, [Relocation::new(route!["old-key"], route!["nested", "a"])]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateSettings {
    versioning: Option<Versioning>,
    relocations: BTreeMap<Version, Vec<Relocation>>,
    ignored: BTreeMap<Version, Vec<Route>>,
    sequences: SequencePolicy,
    version_ahead: VersionAheadPolicy,
}

impl UpdateSettings {
    /// Settings with versioning disabled: an update pass is a plain merge
    /// with no relocations, no ignored routes and no version stamp.
    pub fn unversioned() -> Self {
        Self::default()
    }

    /// Settings with versioning enabled: markers live at `route` and are
    /// parsed against `pattern`.
    pub fn versioned(route: impl Into<Route>, pattern: Pattern) -> Self {
        UpdateSettings {
            versioning: Some(Versioning::new(route, pattern)),
            ..Self::default()
        }
    }

    /// Declares the relocations applied by the transition *to* version
    /// `at`. Declaration order is preserved and significant: relocations
    /// run in the order given here, and of two relocations targeting the
    /// same route the last one wins.
    pub fn with_relocations(
        mut self,
        at: Version,
        relocations: impl IntoIterator<Item = Relocation>,
    ) -> Self {
        self.relocations
            .entry(at)
            .or_default()
            .extend(relocations);
        self
    }

    /// Declares routes exempt from obsolete-key pruning during the
    /// transition *to* version `at`. An ignored route shields itself and
    /// everything below it.
    pub fn with_ignored_routes(
        mut self,
        at: Version,
        routes: impl IntoIterator<Item = Route>,
    ) -> Self {
        self.ignored.entry(at).or_default().extend(routes);
        self
    }

    /// Sets the sequence merge policy. Default: [`SequencePolicy::Atomic`].
    pub fn with_sequence_policy(mut self, policy: SequencePolicy) -> Self {
        self.sequences = policy;
        self
    }

    /// Sets the version-ahead policy. Default: [`VersionAheadPolicy::Fail`].
    pub fn with_version_ahead(mut self, policy: VersionAheadPolicy) -> Self {
        self.version_ahead = policy;
        self
    }

    /// Returns the versioning configuration, if enabled.
    pub fn versioning(&self) -> Option<&Versioning> {
        self.versioning.as_ref()
    }

    /// Returns the relocations declared for the transition to `version`.
    pub fn relocations_at(&self, version: &Version) -> &[Relocation] {
        self.relocations.get(version).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the ignored routes declared for the transition to `version`.
    pub fn ignored_at(&self, version: &Version) -> &[Route] {
        self.ignored.get(version).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the sequence merge policy.
    pub fn sequence_policy(&self) -> SequencePolicy {
        self.sequences
    }

    /// Returns the version-ahead policy.
    pub fn version_ahead(&self) -> VersionAheadPolicy {
        self.version_ahead
    }
}
