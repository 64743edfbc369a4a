use serde::{Deserialize, Serialize};

/// Skip/take window over the filtered collection.
///
/// `take` defaults to, and is capped at, the store's max page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingParams {
    #[serde(default)]
    pub skip: Option<usize>,
    #[serde(default)]
    pub take: Option<usize>,
    /// Request the total number of matching records.
    #[serde(default)]
    pub total: bool,
}

impl PagingParams {
    pub fn new(skip: Option<usize>, take: Option<usize>, total: bool) -> Self {
        Self { skip, take, total }
    }

    pub fn skip(&self) -> usize {
        self.skip.unwrap_or(0)
    }

    pub fn take(&self, max_page_size: usize) -> usize {
        self.take.map_or(max_page_size, |take| take.min(max_page_size))
    }
}

/// One page of records, with the total match count when it was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPage<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> DataPage<T> {
    pub fn new(data: Vec<T>, total: Option<usize>) -> Self {
        Self { data, total }
    }
}
