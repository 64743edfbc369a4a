use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigParams, Configurable, PersistenceConfig};
use crate::error::Result;
use crate::memory::RecordStore;
use crate::persister::JsonFilePersister;

use super::{Identifiable, IdentifiableStore};

/// An [`IdentifiableStore`] persisted to one JSON file.
///
/// Configuration parameters:
/// - `path`: file where the collection is stored
/// - `options.max_page_size`: maximum number of items returned in a single page (default: 100)
pub struct IdentifiableFileStore<T: Identifiable> {
    inner: IdentifiableStore<T>,
    persister: Arc<JsonFilePersister>,
}

impl<T: Identifiable> IdentifiableFileStore<T> {
    /// Without a persister, one with an empty path is used, which makes
    /// persistence a no-op until a `path` is configured.
    pub fn new(persister: Option<JsonFilePersister>) -> Self {
        let persister = Arc::new(persister.unwrap_or_default());
        Self {
            inner: IdentifiableStore::from_store(RecordStore::with_persister(persister.clone())),
            persister,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Some(JsonFilePersister::new(path)))
    }

    pub fn from_config(config: &PersistenceConfig) -> Result<Self> {
        config.validate()?;
        let store = Self::new(Some(JsonFilePersister::new(
            config.path.clone().unwrap_or_default(),
        )));
        store.inner.set_max_page_size(config.options.max_page_size)?;
        Ok(store)
    }

    pub fn persister(&self) -> &JsonFilePersister {
        &self.persister
    }

    /// The underlying store, for sharing between threads.
    pub fn store(&self) -> &IdentifiableStore<T> {
        &self.inner
    }
}

impl<T: Identifiable> Configurable for IdentifiableFileStore<T> {
    fn configure(&self, config: &ConfigParams) -> Result<()> {
        self.persister.configure(config)?;
        self.inner.configure(config)
    }
}

impl<T: Identifiable> Deref for IdentifiableFileStore<T> {
    type Target = IdentifiableStore<T>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
