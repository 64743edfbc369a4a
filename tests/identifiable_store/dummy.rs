use record_store::{
    DataPage, Identifiable, IdentifiableStore, PagingParams, Result,
};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Identifiable)]
pub struct Dummy {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl Dummy {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Store specialized with a name filter, the way concrete stores wrap the
/// generic filter operations.
pub struct DummyStore {
    inner: IdentifiableStore<Dummy>,
}

impl Default for DummyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DummyStore {
    pub fn new() -> Self {
        Self {
            inner: IdentifiableStore::in_memory(),
        }
    }

    pub fn get_page_by_name(
        &self,
        correlation_id: &str,
        name: Option<&str>,
        paging: Option<PagingParams>,
    ) -> Result<DataPage<Dummy>> {
        let by_name = |dummy: &Dummy| name.map_or(true, |name| dummy.name == name);
        self.inner
            .get_page_by_filter(correlation_id, Some(&by_name), paging, None)
    }
}

impl Deref for DummyStore {
    type Target = IdentifiableStore<Dummy>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
