//! Parser/emitter and persistence capability traits.
//!
//! The update engine does not read files or speak any wire format itself.
//! Both concerns are pluggable: a [`Codec`] turns bytes into a document tree
//! and back (preserving comments and key order), a [`Storage`] reads and
//! writes the bytes of one document location. Implementations live with the
//! embedding application — a YAML engine binding, a test double, a network
//! blob store — and the engine stays format-agnostic.

use thiserror::Error;

use crate::Document;

/// Structured error types for codec implementations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CodecError {
    /// The source bytes could not be parsed into a document tree.
    #[error("parse failed: {reason}")]
    Parse { reason: String },

    /// The document tree could not be emitted as bytes.
    #[error("emit failed: {reason}")]
    Emit { reason: String },
}

impl CodecError {
    /// Check if this error occurred while parsing.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CodecError::Parse { .. })
    }
}

impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}

/// Bytes ↔ document tree conversion.
///
/// A codec must preserve comments and mapping key order in both directions,
/// and emitting an unchanged tree must round-trip the bytes it was parsed
/// from (modulo formatting normalization the format itself defines).
pub trait Codec {
    /// Parses source bytes into a document tree.
    fn parse(&self, bytes: &[u8]) -> Result<Document, CodecError>;

    /// Emits a document tree as bytes.
    fn emit(&self, document: &Document) -> Result<Vec<u8>, CodecError>;
}

/// One persistent document location.
pub trait Storage {
    /// Reads the document bytes, or `None` if the location does not exist
    /// yet.
    fn read(&self) -> std::io::Result<Option<Vec<u8>>>;

    /// Writes the document bytes, replacing any previous content.
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()>;
}
