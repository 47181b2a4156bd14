//! The update engine: versioned reconciliation of a user document against
//! its defaults.
//!
//! An update pass runs on the caller's thread to completion, with no I/O:
//!
//! 1. Version markers are extracted from both documents. Missing or
//!    malformed defaults markers abort the pass — defaults ship with the
//!    release and must always declare their format generation.
//! 2. The chain of transitions from the user's version (exclusive) to the
//!    defaults' version (inclusive) is enumerated. Each transition applies
//!    its declared [`Relocation`]s to the user tree and contributes its
//!    ignored routes to the accumulated exemption set.
//! 3. The [merger](self::merger) reconciles the relocated user tree against
//!    the defaults.
//! 4. The defaults' version is stamped into the user tree.
//!
//! The user document is mutated in place and returned to the caller for
//! persistence; the defaults document is never modified.
//!
//! # Usage
//!
//! ```
//! use upkeep::{route, update::{Relocation, UpdateSettings}, version::Pattern, Document};
//!
//! let pattern = Pattern::integer();
//! let v2 = pattern.parse("2").unwrap();
//! let settings = UpdateSettings::versioned(route!["config-version"], pattern)
//!     .with_relocations(v2, [Relocation::new(route!["old-key"], route!["nested", "a"])]);
//!
//! let mut user = Document::new();
//! user.set(&route!["config-version"], 1i64)?;
//! user.set(&route!["old-key"], "keep")?;
//!
//! let mut defaults = Document::new();
//! defaults.set(&route!["config-version"], 2i64)?;
//! defaults.set(&route!["nested", "a"], 1i64)?;
//!
//! user.update(&defaults, &settings)?;
//! assert_eq!(user.get(&route!["nested", "a"]).unwrap().as_scalar().unwrap(), "keep");
//! # Ok::<(), upkeep::Error>(())
//! ```

mod errors;
mod ignored;
mod merger;
mod relocator;
mod settings;

pub use errors::UpdateError;
pub use ignored::IgnoredRoutes;
pub use settings::{
    Relocation, SequencePolicy, UpdateSettings, VersionAheadPolicy, Versioning,
};

use std::cmp::Ordering;

use crate::{
    Document,
    node::Scalar,
    version::{self, Version, VersionError},
};

/// What an update pass did with the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The document was reconciled against the defaults (and stamped, when
    /// versioning is enabled).
    Updated,
    /// The document's version is ahead of the defaults and the configured
    /// policy left it untouched.
    Skipped,
}

/// Reconciles `user` against `defaults` per `settings`.
///
/// With versioning disabled this is a plain merge. Otherwise version
/// markers steer relocation and pruning as described in the
/// [module documentation](self).
///
/// # Errors
///
/// - [`UpdateError::InvalidDefaultsVersion`] when the defaults carry no
///   parseable marker at the configured route.
/// - [`VersionError::Ahead`] when the user document is newer than the
///   defaults and the policy is [`VersionAheadPolicy::Fail`].
/// - [`VersionError::ChainUnreachable`] when no contiguous version chain
///   connects the two markers.
pub fn update(
    user: &mut Document,
    defaults: &Document,
    settings: &UpdateSettings,
) -> crate::Result<UpdateOutcome> {
    let Some(versioning) = settings.versioning() else {
        merger::merge(user, defaults, &IgnoredRoutes::new(), settings.sequence_policy());
        return Ok(UpdateOutcome::Updated);
    };

    let defaults_version = versioning
        .pattern()
        .extract(defaults, versioning.route())
        .ok_or_else(|| UpdateError::InvalidDefaultsVersion {
            route: versioning.route().to_string(),
        })?;

    let Some(user_version) = versioning.pattern().extract(user, versioning.route()) else {
        // No readable marker: treat the document as maximally outdated.
        // There is no known starting transition, so relocations are skipped.
        tracing::info!(
            defaults = %defaults_version,
            "user document carries no readable version marker, merging without relocations"
        );
        merger::merge(user, defaults, &IgnoredRoutes::new(), settings.sequence_policy());
        stamp(user, versioning, &defaults_version)?;
        return Ok(UpdateOutcome::Updated);
    };

    match user_version.cmp(&defaults_version) {
        Ordering::Greater => match settings.version_ahead() {
            VersionAheadPolicy::Fail => Err(VersionError::Ahead {
                user: user_version.to_string(),
                defaults: defaults_version.to_string(),
            }
            .into()),
            VersionAheadPolicy::SkipUpdate => {
                tracing::info!(
                    user = %user_version,
                    defaults = %defaults_version,
                    "document version is ahead of defaults, skipping update"
                );
                Ok(UpdateOutcome::Skipped)
            }
        },
        Ordering::Equal => {
            // Same generation: still merge, so template additions shipped
            // without a version bump reach the document.
            merger::merge(user, defaults, &IgnoredRoutes::new(), settings.sequence_policy());
            stamp(user, versioning, &defaults_version)?;
            Ok(UpdateOutcome::Updated)
        }
        Ordering::Less => {
            let transitions = version::chain(&user_version, &defaults_version)?;
            tracing::info!(
                from = %user_version,
                to = %defaults_version,
                transitions = transitions.len(),
                "updating document"
            );

            let mut ignored = IgnoredRoutes::new();
            for transition in &transitions {
                relocator::apply(user, settings.relocations_at(transition))?;
                ignored.extend(settings.ignored_at(transition).iter().cloned());
            }

            merger::merge(user, defaults, &ignored, settings.sequence_policy());
            stamp(user, versioning, &defaults_version)?;
            tracing::info!(version = %defaults_version, "update completed");
            Ok(UpdateOutcome::Updated)
        }
    }
}

/// Writes `version` into the marker route of `user`, keeping the marker
/// node's comments when one is already present. Integer-shaped versions are
/// stamped as integers so the marker keeps its scalar type.
fn stamp(user: &mut Document, versioning: &Versioning, version: &Version) -> crate::Result<()> {
    let scalar = match version.as_int() {
        Some(n) => Scalar::Int(n),
        None => Scalar::Text(version.to_string()),
    };
    match user.get_mut(versioning.route()) {
        Some(node) => node.set_value(scalar),
        None => {
            user.set(versioning.route(), crate::node::Node::new(scalar))?;
        }
    }
    Ok(())
}
