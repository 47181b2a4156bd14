//!
//! Upkeep: a versioned update engine for structured, human-editable
//! configuration documents. It reconciles a previously saved user document
//! against a newer defaults template across declared format versions —
//! keeping user customizations and comments, applying declared route
//! relocations, and removing keys the template has retired.
//!
//! ## Core Concepts
//!
//! * **Routes (`route::Route`)**: immutable key paths addressing nodes in a
//!   document tree, parseable from a delimited string form.
//! * **Nodes (`node::Node`)**: the owned tree model — mappings with
//!   insertion-ordered unique keys, sequences and scalar leaves, each node
//!   carrying its block and inline comments.
//! * **Documents (`Document`)**: the root handle exposing route-addressed
//!   get/set/remove/contains and `Section` views.
//! * **Versions (`version::Pattern`)**: declarative version-marker patterns
//!   with total ordering and successor stepping, used to enumerate the
//!   transitions between two releases.
//! * **Updates (`update`)**: the reconciliation engine — per-transition
//!   relocations and ignored routes, the defaults-driven merge, and the
//!   version stamp.
//! * **Codecs (`codec`)**: pluggable bytes↔tree and persistence
//!   capabilities; the engine assumes no specific wire format.
//!
//! ## Example
//!
//! ```
//! use upkeep::{route, update::{Relocation, UpdateSettings}, version::Pattern, Document};
//!
//! // Defaults shipped with release 2.
//! let mut defaults = Document::new();
//! defaults.set(&route!["config-version"], 2i64)?;
//! defaults.set(&route!["name"], "default")?;
//! defaults.set(&route!["nested", "a"], 1i64)?;
//!
//! // A user document last saved by release 1.
//! let mut user = Document::new();
//! user.set(&route!["config-version"], 1i64)?;
//! user.set(&route!["name"], "custom")?;
//! user.set(&route!["old-key"], "keep")?;
//!
//! // The 1 -> 2 transition renamed `old-key` to `nested.a`.
//! let pattern = Pattern::integer();
//! let v2 = pattern.parse("2").unwrap();
//! let settings = UpdateSettings::versioned(route!["config-version"], pattern)
//!     .with_relocations(v2, [Relocation::new(route!["old-key"], route!["nested", "a"])]);
//!
//! user.update(&defaults, &settings)?;
//!
//! assert_eq!(user.get(&route!["config-version"]).unwrap().as_scalar().unwrap().as_int(), Some(2));
//! assert_eq!(user.get(&route!["name"]).unwrap().as_scalar().unwrap(), "custom");
//! assert_eq!(user.get(&route!["nested", "a"]).unwrap().as_scalar().unwrap(), "keep");
//! assert!(!user.contains(&route!["old-key"]));
//! # Ok::<(), upkeep::Error>(())
//! ```

pub mod codec;
pub mod document;
pub mod loader;
pub mod node;
pub mod route;
pub mod section;
pub mod update;
pub mod version;

/// Re-export the `Document` struct for easier access.
pub use document::Document;
/// Re-export the `Section` handle for easier access.
pub use section::Section;

/// Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structured route parsing errors from the route module
    #[error(transparent)]
    Route(route::RouteError),

    /// Structured tree mutation errors from the document module
    #[error(transparent)]
    Tree(document::TreeError),

    /// Structured version handling errors from the version module
    #[error(transparent)]
    Version(version::VersionError),

    /// Structured update errors from the update module
    #[error(transparent)]
    Update(update::UpdateError),

    /// Structured codec errors from the codec module
    #[error(transparent)]
    Codec(codec::CodecError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Route(_) => "route",
            Error::Tree(_) => "document",
            Error::Version(_) => "version",
            Error::Update(_) => "update",
            Error::Codec(_) => "codec",
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error reports a document ahead of its defaults.
    pub fn is_version_ahead(&self) -> bool {
        match self {
            Error::Version(version_err) => version_err.is_ahead(),
            _ => false,
        }
    }

    /// Check if this error reports a broken version chain.
    pub fn is_chain_error(&self) -> bool {
        match self {
            Error::Version(version_err) => version_err.is_chain_error(),
            _ => false,
        }
    }

    /// Check if this error reports invalid defaults configuration.
    pub fn is_configuration_error(&self) -> bool {
        match self {
            Error::Update(update_err) => update_err.is_configuration_error(),
            _ => false,
        }
    }

    /// Check if this error occurred while parsing source bytes.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Codec(codec_err) => codec_err.is_parse_error(),
            _ => false,
        }
    }
}
