//! Identifiable stores - Id-addressed CRUD, filtering and paging.
//!
//! [`IdentifiableStore`] layers operations keyed on a record's string id on
//! top of [`RecordStore`](crate::RecordStore). Specialized stores usually
//! only wrap `get_page_by_filter` / `get_list_by_filter` /
//! `delete_by_filter` with their own filter functions; every other
//! operation is usable as is.
//!
//! ## Example
//!
//! ```ignore
//! use record_store::{Identifiable, IdentifiableFileStore, PagingParams};
//!
//! #[derive(Clone, Serialize, Deserialize, Identifiable)]
//! struct Dummy {
//!     id: String,
//!     name: String,
//! }
//!
//! let store = IdentifiableFileStore::<Dummy>::from_path("./data/dummies.json");
//! store.open("123")?;
//! let created = store.create("123", Dummy { id: String::new(), name: "ABC".into() })?;
//! let page = store.get_page_by_filter("123", Some(&|d: &Dummy| d.name == "ABC"), None, None)?;
//! store.delete_by_id("123", created.id())?;
//! ```

mod file;
mod paging;
mod store;

use uuid::Uuid;

use crate::memory::Record;

/// A record with a unique, stable string id.
///
/// Two records are the same entity iff their ids are equal. An empty id
/// means "not assigned yet"; stores generate one on insert.
pub trait Identifiable: Record {
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

/// A new opaque id: 32 lowercase hex characters.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub use file::IdentifiableFileStore;
pub use paging::{DataPage, PagingParams};
pub use store::{Filter, IdentifiableStore, SortCompare};
