//! Shared helpers for the integration tests.

use upkeep::{
    Document,
    codec::{Codec, CodecError, Storage},
    route::Route,
    update::UpdateSettings,
    version::Pattern,
};

/// A codec double that persists trees through serde_json. It round-trips
/// comments, typed keys and key order, which is all the engine asks of a
/// real codec.
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn parse(&self, bytes: &[u8]) -> Result<Document, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Parse {
            reason: e.to_string(),
        })
    }

    fn emit(&self, document: &Document) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(document).map_err(|e| CodecError::Emit {
            reason: e.to_string(),
        })
    }
}

/// An in-memory storage double.
#[derive(Default)]
pub struct MemoryStorage {
    pub contents: Option<Vec<u8>>,
}

impl MemoryStorage {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_contents(bytes: Vec<u8>) -> Self {
        MemoryStorage {
            contents: Some(bytes),
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> std::io::Result<Option<Vec<u8>>> {
        Ok(self.contents.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.contents = Some(bytes.to_vec());
        Ok(())
    }
}

/// A storage double whose reads always fail.
pub struct BrokenStorage;

impl Storage for BrokenStorage {
    fn read(&self) -> std::io::Result<Option<Vec<u8>>> {
        Err(std::io::Error::other("disk on fire"))
    }

    fn write(&mut self, _bytes: &[u8]) -> std::io::Result<()> {
        Err(std::io::Error::other("disk on fire"))
    }
}

/// Integer-marker settings at `config-version`, the common fixture shape.
pub fn integer_settings() -> UpdateSettings {
    UpdateSettings::versioned(version_route(), Pattern::integer())
}

pub fn version_route() -> Route {
    upkeep::route!["config-version"]
}

/// Renders the root-level key order of a document.
pub fn root_keys(document: &Document) -> Vec<String> {
    document.root().keys().map(ToString::to_string).collect()
}

/// Reads the scalar at `route` as text, panicking on absence.
pub fn text_at(document: &Document, route: &Route) -> String {
    document
        .get(route)
        .unwrap_or_else(|| panic!("no node at {route}"))
        .as_scalar()
        .unwrap_or_else(|| panic!("non-scalar at {route}"))
        .as_str()
        .unwrap_or_else(|| panic!("non-text at {route}"))
        .to_string()
}

/// Reads the scalar at `route` as an integer, panicking on absence.
pub fn int_at(document: &Document, route: &Route) -> i64 {
    document
        .get(route)
        .unwrap_or_else(|| panic!("no node at {route}"))
        .as_scalar()
        .unwrap_or_else(|| panic!("non-scalar at {route}"))
        .as_int()
        .unwrap_or_else(|| panic!("non-int at {route}"))
}
