//! Error types for update passes.

use thiserror::Error;

/// Structured error types for the update coordinator.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    /// The defaults document carries no valid version marker at the
    /// configured route. Defaults are authored alongside the release, so
    /// this is a configuration bug and aborts the update.
    #[error("defaults document has a missing or malformed version marker at '{route}'")]
    InvalidDefaultsVersion { route: String },
}

impl UpdateError {
    /// Check if this error reports invalid defaults configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, UpdateError::InvalidDefaultsVersion { .. })
    }
}

impl From<UpdateError> for crate::Error {
    fn from(err: UpdateError) -> Self {
        crate::Error::Update(err)
    }
}
