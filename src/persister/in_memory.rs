//! InMemoryPersister - Volatile medium for testing and for sharing a
//! snapshot between store instances.

use std::sync::{Arc, RwLock};

use crate::error::{PersistenceError, Result};

use super::{GenericRecord, Loader, Saver};

/// Medium backed by `Arc<RwLock<..>>`.
///
/// Clone-friendly (cloning shares the same underlying snapshot), so a store
/// can be dropped and a new one opened against the same data to simulate a
/// restart.
#[derive(Clone, Default)]
pub struct InMemoryPersister {
    snapshot: Arc<RwLock<Option<Vec<GenericRecord>>>>,
}

impl InMemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// A medium that already holds `items`.
    pub fn with_items(items: Vec<GenericRecord>) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Some(items))),
        }
    }

    /// The last saved snapshot, or `None` if nothing was saved yet.
    pub fn snapshot(&self) -> Result<Option<Vec<GenericRecord>>> {
        let snapshot = self
            .snapshot
            .read()
            .map_err(|_| PersistenceError::LockPoisoned("snapshot read"))?;
        Ok(snapshot.clone())
    }
}

impl Loader for InMemoryPersister {
    fn load(&self, _correlation_id: &str) -> Result<Option<Vec<GenericRecord>>> {
        self.snapshot()
    }
}

impl Saver for InMemoryPersister {
    fn save(&self, _correlation_id: &str, items: &[GenericRecord]) -> Result<()> {
        let mut snapshot = self
            .snapshot
            .write()
            .map_err(|_| PersistenceError::LockPoisoned("snapshot write"))?;
        *snapshot = Some(items.to_vec());
        Ok(())
    }
}
