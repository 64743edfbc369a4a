use std::collections::BTreeMap;

use crate::error::{PersistenceError, Result};

/// Flat map of dotted string keys to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigParams {
    values: BTreeMap<String, String>,
}

impl ConfigParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tuples(tuples: &[(&str, &str)]) -> Self {
        let mut params = Self::new();
        for (key, value) in tuples {
            params.set(*key, *value);
        }
        params
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parses the value as `usize`. Absent keys and blank values yield `None`.
    pub fn get_as_nullable_usize(&self, key: &str) -> Result<Option<usize>> {
        match self.get(key).map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|_| {
                PersistenceError::Config(format!("{} must be a non-negative integer, got {:?}", key, raw))
            }),
        }
    }

    /// Keys under `prefix.`, with the prefix stripped.
    pub fn get_section(&self, prefix: &str) -> ConfigParams {
        let dotted = format!("{}.", prefix);
        let values = self
            .values
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&dotted)
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect();
        ConfigParams { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
