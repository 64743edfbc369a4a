use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ConfigParams, Configurable};
use crate::error::Result;
use crate::persister::JsonFilePersister;

use super::{Record, RecordStore};

/// A [`RecordStore`] whose loader and saver are one [`JsonFilePersister`].
///
/// Configuration parameters:
/// - `path`: file where the collection is stored
pub struct FileStore<T: Record> {
    inner: RecordStore<T>,
    persister: Arc<JsonFilePersister>,
}

impl<T: Record> FileStore<T> {
    /// Without a persister, one with an empty path is used, which makes
    /// persistence a no-op until a `path` is configured.
    pub fn new(persister: Option<JsonFilePersister>) -> Self {
        let persister = Arc::new(persister.unwrap_or_default());
        Self {
            inner: RecordStore::with_persister(persister.clone()),
            persister,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(Some(JsonFilePersister::new(path)))
    }

    pub fn persister(&self) -> &JsonFilePersister {
        &self.persister
    }

    /// The underlying store, for sharing between threads.
    pub fn store(&self) -> &RecordStore<T> {
        &self.inner
    }
}

impl<T: Record> Configurable for FileStore<T> {
    fn configure(&self, config: &ConfigParams) -> Result<()> {
        self.persister.configure(config)
    }
}

impl<T: Record> Deref for FileStore<T> {
    type Target = RecordStore<T>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
