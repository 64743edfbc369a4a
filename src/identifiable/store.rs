//! IdentifiableStore - Id-based CRUD and filtered paging over a RecordStore.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use log::trace;
use rand::seq::SliceRandom;

use crate::config::{ConfigParams, Configurable, DEFAULT_MAX_PAGE_SIZE};
use crate::error::{PersistenceError, Result};
use crate::memory::RecordStore;
use crate::persister::{Loader, Saver};

use super::{generate_id, DataPage, Identifiable, PagingParams};

/// Predicate selecting records. `None` where a filter is optional matches all.
pub type Filter<'a, T> = &'a dyn Fn(&T) -> bool;

/// Ordering applied to matching records before paging.
pub type SortCompare<'a, T> = &'a dyn Fn(&T, &T) -> Ordering;

/// Store of [`Identifiable`] records.
///
/// Reads run under the shared lock; every mutation runs under the exclusive
/// lock together with the save it triggers. Operations that find nothing to
/// change (`update` of an unknown id, deletes that match nothing) return an
/// empty result and skip the save.
///
/// Configuration parameters:
/// - `options.max_page_size`: maximum number of items returned in a single page (default: 100)
///
/// Derefs to [`RecordStore`] for `open`, `close`, `save` and `clear`.
pub struct IdentifiableStore<T: Identifiable> {
    inner: RecordStore<T>,
    max_page_size: Arc<AtomicUsize>,
}

impl<T: Identifiable> Clone for IdentifiableStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            max_page_size: Arc::clone(&self.max_page_size),
        }
    }
}

impl<T: Identifiable> fmt::Debug for IdentifiableStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifiableStore")
            .field("inner", &self.inner)
            .field("max_page_size", &self.max_page_size())
            .finish()
    }
}

impl<T: Identifiable> Default for IdentifiableStore<T> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<T: Identifiable> IdentifiableStore<T> {
    pub fn new(loader: Option<Arc<dyn Loader>>, saver: Option<Arc<dyn Saver>>) -> Self {
        Self::from_store(RecordStore::new(loader, saver))
    }

    pub fn in_memory() -> Self {
        Self::from_store(RecordStore::in_memory())
    }

    pub fn with_persister<P>(persister: Arc<P>) -> Self
    where
        P: Loader + Saver + 'static,
    {
        Self::from_store(RecordStore::with_persister(persister))
    }

    pub fn from_store(store: RecordStore<T>) -> Self {
        Self {
            inner: store,
            max_page_size: Arc::new(AtomicUsize::new(DEFAULT_MAX_PAGE_SIZE)),
        }
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size.load(AtomicOrdering::SeqCst)
    }

    pub fn set_max_page_size(&self, max_page_size: usize) -> Result<()> {
        if max_page_size == 0 {
            return Err(PersistenceError::Config(
                "options.max_page_size must be >= 1".into(),
            ));
        }
        self.max_page_size
            .store(max_page_size, AtomicOrdering::SeqCst);
        Ok(())
    }

    /// Matching records in collection order (or `sort` order), windowed by
    /// `paging`. The total, when requested, counts every match.
    pub fn get_page_by_filter(
        &self,
        correlation_id: &str,
        filter: Option<Filter<'_, T>>,
        paging: Option<PagingParams>,
        sort: Option<SortCompare<'_, T>>,
    ) -> Result<DataPage<T>> {
        let paging = paging.unwrap_or_default();
        let skip = paging.skip();
        let take = paging.take(self.max_page_size());

        self.inner.with_items(|items| {
            let matches = select(items, filter, sort);
            let total = matches.len();
            let data: Vec<T> = matches
                .into_iter()
                .skip(skip)
                .take(take)
                .cloned()
                .collect();

            trace!(
                "[{}] Retrieved {} of {} items",
                correlation_id,
                data.len(),
                total
            );
            DataPage::new(data, paging.total.then_some(total))
        })
    }

    /// Every matching record, unpaged.
    pub fn get_list_by_filter(
        &self,
        correlation_id: &str,
        filter: Option<Filter<'_, T>>,
        sort: Option<SortCompare<'_, T>>,
    ) -> Result<Vec<T>> {
        self.inner.with_items(|items| {
            let data: Vec<T> = select(items, filter, sort).into_iter().cloned().collect();
            trace!("[{}] Retrieved {} items", correlation_id, data.len());
            data
        })
    }

    pub fn get_count_by_filter(
        &self,
        correlation_id: &str,
        filter: Option<Filter<'_, T>>,
    ) -> Result<usize> {
        self.inner.with_items(|items| {
            let count = items
                .iter()
                .filter(|item| filter.map_or(true, |f| f(*item)))
                .count();
            trace!("[{}] Counted {} items", correlation_id, count);
            count
        })
    }

    /// The record with `id`, or `None` when absent.
    pub fn get_one_by_id(&self, correlation_id: &str, id: &str) -> Result<Option<T>> {
        self.inner.with_items(|items| {
            let found = items.iter().find(|item| item.id() == id).cloned();
            if found.is_some() {
                trace!("[{}] Retrieved item {}", correlation_id, id);
            } else {
                trace!("[{}] Cannot find item by {}", correlation_id, id);
            }
            found
        })
    }

    /// Records whose ids appear in `ids`, in collection order.
    pub fn get_list_by_ids(&self, correlation_id: &str, ids: &[&str]) -> Result<Vec<T>> {
        let wanted: HashSet<&str> = ids.iter().copied().collect();
        self.get_list_by_filter(correlation_id, Some(&|item: &T| wanted.contains(item.id())), None)
    }

    /// A record chosen uniformly at random among the matches.
    pub fn get_one_random(
        &self,
        correlation_id: &str,
        filter: Option<Filter<'_, T>>,
    ) -> Result<Option<T>> {
        self.inner.with_items(|items| {
            let matches = select(items, filter, None);
            let chosen = matches.choose(&mut rand::thread_rng()).map(|item| (*item).clone());
            if let Some(item) = &chosen {
                trace!("[{}] Retrieved random item {}", correlation_id, item.id());
            } else {
                trace!("[{}] Nothing to choose from", correlation_id);
            }
            chosen
        })
    }

    /// Append `item`, generating an id when it has none.
    ///
    /// An explicit id that is already present fails with
    /// [`PersistenceError::AlreadyExists`] and leaves the collection unchanged.
    pub fn create(&self, correlation_id: &str, mut item: T) -> Result<T> {
        if item.id().is_empty() {
            item.set_id(generate_id());
        }
        let id = item.id().to_string();

        let created = self.inner.modify(correlation_id, |items| {
            if items.iter().any(|existing| existing.id() == id) {
                return None;
            }
            items.push(item.clone());
            Some(item)
        })?;

        match created {
            Some(item) => {
                trace!("[{}] Created item {}", correlation_id, id);
                Ok(item)
            }
            None => Err(PersistenceError::AlreadyExists { id }),
        }
    }

    /// Replace the record with the same id in place, or append `item`.
    pub fn set(&self, correlation_id: &str, mut item: T) -> Result<T> {
        if item.id().is_empty() {
            item.set_id(generate_id());
        }

        let stored = self.inner.with_items_mut(correlation_id, |items| {
            match position_of(items, item.id()) {
                Some(index) => items[index] = item.clone(),
                None => items.push(item.clone()),
            }
            item
        })?;

        trace!("[{}] Set item {}", correlation_id, stored.id());
        Ok(stored)
    }

    /// Replace the record with the same id in place. `None` when no record
    /// has that id.
    pub fn update(&self, correlation_id: &str, item: T) -> Result<Option<T>> {
        let updated = self.inner.modify(correlation_id, |items| {
            let index = position_of(items, item.id())?;
            items[index] = item.clone();
            Some(item)
        })?;

        match &updated {
            Some(item) => trace!("[{}] Updated item {}", correlation_id, item.id()),
            None => trace!("[{}] Cannot find item to update", correlation_id),
        }
        Ok(updated)
    }

    /// Remove the record with `id`, returning it. `None` when absent.
    pub fn delete_by_id(&self, correlation_id: &str, id: &str) -> Result<Option<T>> {
        let removed = self.inner.modify(correlation_id, |items| {
            let index = position_of(items, id)?;
            Some(items.remove(index))
        })?;

        if removed.is_some() {
            trace!("[{}] Deleted item {}", correlation_id, id);
        }
        Ok(removed)
    }

    /// Remove every record whose id appears in `ids`, saving once.
    pub fn delete_by_ids(&self, correlation_id: &str, ids: &[&str]) -> Result<usize> {
        let wanted: HashSet<&str> = ids.iter().copied().collect();
        self.delete_by_filter(correlation_id, &|item: &T| wanted.contains(item.id()))
    }

    /// Remove every matching record, saving once for the whole batch.
    pub fn delete_by_filter(&self, correlation_id: &str, filter: Filter<'_, T>) -> Result<usize> {
        let deleted = self.inner.modify(correlation_id, |items| {
            let before = items.len();
            items.retain(|item| !filter(item));
            let deleted = before - items.len();
            (deleted > 0).then_some(deleted)
        })?;

        let deleted = deleted.unwrap_or(0);
        trace!("[{}] Deleted {} items", correlation_id, deleted);
        Ok(deleted)
    }
}

impl<T: Identifiable> Configurable for IdentifiableStore<T> {
    fn configure(&self, config: &ConfigParams) -> Result<()> {
        let options = config.get_section("options");
        if let Some(max_page_size) = options.get_as_nullable_usize("max_page_size")? {
            self.set_max_page_size(max_page_size)?;
        }
        Ok(())
    }
}

impl<T: Identifiable> Deref for IdentifiableStore<T> {
    type Target = RecordStore<T>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

fn position_of<T: Identifiable>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

fn select<'a, T>(
    items: &'a [T],
    filter: Option<Filter<'_, T>>,
    sort: Option<SortCompare<'_, T>>,
) -> Vec<&'a T> {
    let mut matches: Vec<&T> = items
        .iter()
        .filter(|item| filter.map_or(true, |f| f(*item)))
        .collect();
    if let Some(compare) = sort {
        matches.sort_by(|a, b| compare(*a, *b));
    }
    matches
}
