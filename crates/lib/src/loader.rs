//! Document loading against pluggable storage and codec collaborators.

use crate::{
    Document,
    codec::{Codec, Storage},
    update::UpdateSettings,
};

/// Options for [`load`].
///
/// ```
/// use upkeep::loader::LoaderSettings;
///
/// let settings = LoaderSettings::new().with_auto_update(true);
/// assert!(settings.auto_update());
/// assert!(settings.create_file_if_absent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSettings {
    auto_update: bool,
    create_file_if_absent: bool,
}

impl LoaderSettings {
    /// Creates the default loader settings: no automatic update, create the
    /// file when it is absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to run an update pass against the defaults right after
    /// loading. Default: false.
    pub fn with_auto_update(mut self, auto_update: bool) -> Self {
        self.auto_update = auto_update;
        self
    }

    /// Sets whether a missing document is materialized from the defaults
    /// and written back to storage. Default: true.
    pub fn with_create_file_if_absent(mut self, create: bool) -> Self {
        self.create_file_if_absent = create;
        self
    }

    /// Returns whether an update pass runs after loading.
    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    /// Returns whether a missing document is created from the defaults.
    pub fn create_file_if_absent(&self) -> bool {
        self.create_file_if_absent
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        LoaderSettings {
            auto_update: false,
            create_file_if_absent: true,
        }
    }
}

/// Loads a document from `storage` via `codec`.
///
/// When the location holds bytes, they are parsed and — if
/// [`LoaderSettings::auto_update`] is set — reconciled against `defaults`
/// per `update_settings`. When the location is empty, the defaults are
/// cloned as the fresh document and, if
/// [`LoaderSettings::create_file_if_absent`] is set, emitted and written
/// back so the file exists on disk from the first run.
///
/// Nothing is persisted after an update pass; writing the reconciled
/// document back is the caller's decision (and is what keeps a failed pass
/// from clobbering the file).
pub fn load<S: Storage, C: Codec>(
    storage: &mut S,
    codec: &C,
    defaults: &Document,
    loader_settings: &LoaderSettings,
    update_settings: &UpdateSettings,
) -> crate::Result<Document> {
    match storage.read()? {
        Some(bytes) => {
            let mut document = codec.parse(&bytes)?;
            if loader_settings.auto_update() {
                document.update(defaults, update_settings)?;
            }
            Ok(document)
        }
        None => {
            tracing::info!("document absent, starting from defaults");
            let document = defaults.clone();
            if loader_settings.create_file_if_absent() {
                let bytes = codec.emit(&document)?;
                storage.write(&bytes)?;
            }
            Ok(document)
        }
    }
}
