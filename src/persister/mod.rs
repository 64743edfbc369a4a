//! Persisters - Whole-collection load/save against an external medium.
//!
//! A store depends only on the [`Loader`] and [`Saver`] capabilities. Items
//! cross this boundary as generic records (`serde_json::Value`); the store
//! materializes them into its typed record on load.

mod in_memory;
mod json_file;

use serde_json::Value;

use crate::error::Result;

/// A schema-free record as read from or written to an external medium.
pub type GenericRecord = Value;

/// Reads the entire persisted collection.
pub trait Loader: Send + Sync {
    /// Returns `Ok(None)` when there is nothing to load and the store should
    /// keep its current collection.
    fn load(&self, correlation_id: &str) -> Result<Option<Vec<GenericRecord>>>;
}

/// Writes the entire collection, replacing any prior persisted state.
///
/// Implementations must be all-or-nothing: a failed save leaves the
/// previously persisted collection readable.
pub trait Saver: Send + Sync {
    fn save(&self, correlation_id: &str, items: &[GenericRecord]) -> Result<()>;
}

pub use in_memory::InMemoryPersister;
pub use json_file::JsonFilePersister;
