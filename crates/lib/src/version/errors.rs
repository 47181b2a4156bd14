//! Error types for version handling.

use thiserror::Error;

/// Structured error types for version patterns and version chains.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    /// A pattern was constructed from invalid segments.
    #[error("invalid version pattern: {reason}")]
    InvalidPattern { reason: String },

    /// No contiguous chain of versions leads from `from` to `to`.
    #[error("no version chain from '{from}' to '{to}'")]
    ChainUnreachable { from: String, to: String },

    /// The user document's version is ahead of the defaults' version and the
    /// configured policy treats that as fatal.
    #[error("document version '{user}' is ahead of the defaults version '{defaults}'")]
    Ahead { user: String, defaults: String },
}

impl VersionError {
    /// Check if this error reports a broken version chain.
    pub fn is_chain_error(&self) -> bool {
        matches!(self, VersionError::ChainUnreachable { .. })
    }

    /// Check if this error reports a document ahead of its defaults.
    pub fn is_ahead(&self) -> bool {
        matches!(self, VersionError::Ahead { .. })
    }
}

impl From<VersionError> for crate::Error {
    fn from(err: VersionError) -> Self {
        crate::Error::Version(err)
    }
}
