//! Generic in-process record store.
//!
//! Keeps a typed collection in memory, optionally mirrored to an external
//! medium as whole-collection snapshots, with id-based CRUD and filtered
//! paging for records that carry a string id.
//!
//! - [`RecordStore`]: locked collection with `open` / `close` / `save` / `clear`
//! - [`IdentifiableStore`]: CRUD, filter and paging over [`Identifiable`] records
//! - [`FileStore`], [`IdentifiableFileStore`]: the same, persisted to a JSON file

mod config;
mod error;
mod identifiable;
mod memory;
mod persister;

pub use config::{
    ConfigParams, Configurable, PersistenceConfig, PersistenceOptions, DEFAULT_MAX_PAGE_SIZE,
};
pub use error::{PersistenceError, Result};
pub use identifiable::{
    generate_id, DataPage, Filter, Identifiable, IdentifiableFileStore, IdentifiableStore,
    PagingParams, SortCompare,
};
pub use memory::{FileStore, Record, RecordStore};
pub use persister::{GenericRecord, InMemoryPersister, JsonFilePersister, Loader, Saver};

// Derive macro for `Identifiable`
pub use record_store_macros::Identifiable;
