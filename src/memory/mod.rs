//! Record stores - Typed in-memory collections with optional snapshots.
//!
//! [`RecordStore`] keeps a collection of one record type in memory and
//! loads/saves the whole collection through the [`Loader`](crate::Loader)
//! and [`Saver`](crate::Saver) capabilities. With neither configured it is a
//! pure cache. [`FileStore`] fixes the medium to a
//! [`JsonFilePersister`](crate::JsonFilePersister).
//!
//! ## Example
//!
//! ```ignore
//! use record_store::FileStore;
//!
//! let store = FileStore::<Dummy>::from_path("./data/dummies.json");
//! store.open("123")?;
//! store.with_items_mut("123", |items| items.push(dummy))?;
//! store.close("123")?;
//! ```

mod file;
mod store;

use serde::{de::DeserializeOwned, Serialize};

/// Types that can be held by a store.
///
/// Blanket-implemented for anything serde can move in and out of a generic
/// record and that can be shared between threads.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> Record for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

pub use file::FileStore;
pub use store::RecordStore;
