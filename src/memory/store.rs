//! RecordStore - Concurrency-safe collection with a load/save lifecycle.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::trace;

use crate::error::{PersistenceError, Result};
use crate::persister::{GenericRecord, Loader, Saver};

use super::Record;

/// In-memory collection of `T` guarded by a single reader/writer lock.
///
/// Every operation holds the lock for its full duration, including the save
/// triggered by a mutation, so readers only ever observe the collection
/// entirely before or entirely after a change.
///
/// Clone-friendly (cloning shares the same collection and open state).
pub struct RecordStore<T: Record> {
    items: Arc<RwLock<Vec<T>>>,
    loader: Option<Arc<dyn Loader>>,
    saver: Option<Arc<dyn Saver>>,
    opened: Arc<AtomicBool>,
}

impl<T: Record> Clone for RecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            loader: self.loader.clone(),
            saver: self.saver.clone(),
            opened: Arc::clone(&self.opened),
        }
    }
}

impl<T: Record> fmt::Debug for RecordStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("has_loader", &self.loader.is_some())
            .field("has_saver", &self.saver.is_some())
            .field("opened", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<T: Record> RecordStore<T> {
    /// Create an empty store. Without a loader `open` never populates the
    /// collection; without a saver `save` is a no-op.
    pub fn new(loader: Option<Arc<dyn Loader>>, saver: Option<Arc<dyn Saver>>) -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            loader,
            saver,
            opened: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A volatile store with no external medium.
    pub fn in_memory() -> Self {
        Self::new(None, None)
    }

    /// A store that uses one component as both loader and saver.
    pub fn with_persister<P>(persister: Arc<P>) -> Self
    where
        P: Loader + Saver + 'static,
    {
        let loader: Arc<dyn Loader> = persister.clone();
        let saver: Arc<dyn Saver> = persister;
        Self::new(Some(loader), Some(saver))
    }

    pub fn is_open(&self) -> bool {
        self.opened.load(Ordering::SeqCst)
    }

    /// Load the collection from the loader and mark the store open.
    ///
    /// On failure the store stays closed and the current collection is left
    /// untouched.
    pub fn open(&self, correlation_id: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| PersistenceError::LockPoisoned("open"))?;

        if let Some(loader) = &self.loader {
            if let Some(loaded) = loader.load(correlation_id)? {
                *items = materialize(loaded)?;
                trace!("[{}] Loaded {} items", correlation_id, items.len());
            }
        }

        self.opened.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Save the collection and mark the store closed. The store is closed
    /// even when the save fails; the save error is returned.
    pub fn close(&self, correlation_id: &str) -> Result<()> {
        let saved = self.save(correlation_id);
        self.opened.store(false, Ordering::SeqCst);
        saved
    }

    /// Pass the current collection to the saver.
    pub fn save(&self, correlation_id: &str) -> Result<()> {
        let items = self
            .items
            .read()
            .map_err(|_| PersistenceError::LockPoisoned("save"))?;
        self.save_items(correlation_id, &items)
    }

    /// Empty the collection and persist the empty state.
    pub fn clear(&self, correlation_id: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| PersistenceError::LockPoisoned("clear"))?;
        items.clear();
        trace!("[{}] Cleared items", correlation_id);
        self.save_items(correlation_id, &items)
    }

    pub fn len(&self) -> Result<usize> {
        self.with_items(|items| items.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.with_items(|items| items.is_empty())
    }

    /// Run `f` over the collection under the shared lock.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> Result<R> {
        let items = self
            .items
            .read()
            .map_err(|_| PersistenceError::LockPoisoned("read"))?;
        Ok(f(items.as_slice()))
    }

    /// Mutate the collection under the exclusive lock, then save while still
    /// holding it.
    pub fn with_items_mut<R>(
        &self,
        correlation_id: &str,
        f: impl FnOnce(&mut Vec<T>) -> R,
    ) -> Result<R> {
        let mut items = self
            .items
            .write()
            .map_err(|_| PersistenceError::LockPoisoned("write"))?;

        let result = f(&mut *items);
        self.save_items(correlation_id, &items)?;
        Ok(result)
    }

    /// Like [`with_items_mut`](Self::with_items_mut), but `f` reports whether
    /// it changed anything: returning `None` skips the save.
    pub fn modify<R>(
        &self,
        correlation_id: &str,
        f: impl FnOnce(&mut Vec<T>) -> Option<R>,
    ) -> Result<Option<R>> {
        let mut items = self
            .items
            .write()
            .map_err(|_| PersistenceError::LockPoisoned("write"))?;

        match f(&mut *items) {
            Some(result) => {
                self.save_items(correlation_id, &items)?;
                Ok(Some(result))
            }
            None => Ok(None),
        }
    }

    // Callers hold the lock guarding `items`.
    fn save_items(&self, correlation_id: &str, items: &[T]) -> Result<()> {
        let saver = match &self.saver {
            Some(saver) => saver,
            None => return Ok(()),
        };

        let records = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::to_value(item).map_err(|e| PersistenceError::Conversion {
                    index,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<GenericRecord>>>()?;

        saver.save(correlation_id, &records)?;
        trace!("[{}] Saved {} items", correlation_id, records.len());
        Ok(())
    }
}

/// Structural conversion of generic records into the typed record.
fn materialize<T: Record>(records: Vec<GenericRecord>) -> Result<Vec<T>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record).map_err(|e| PersistenceError::Conversion {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
