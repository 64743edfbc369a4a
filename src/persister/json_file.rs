//! JsonFilePersister - Stores the whole collection as a JSON array in one file.
//!
//! Saves are atomic: the array is written to `<path>.tmp` and renamed over
//! `<path>`, so a failed save never leaves a half-written file behind.
//! Saves through one persister are serialized, so overlapping saves never
//! share the temp file.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use log::trace;
use serde_json::Value;

use crate::config::{ConfigParams, Configurable};
use crate::error::{PersistenceError, Result};

use super::{GenericRecord, Loader, Saver};

/// File medium for [`Loader`] / [`Saver`].
///
/// An empty path turns the persister into a no-op: loads return nothing and
/// saves are dropped. The path can be replaced through [`Configurable`]
/// (`path` key) before the owning store is opened.
#[derive(Debug, Default)]
pub struct JsonFilePersister {
    path: RwLock<PathBuf>,
    // Held across the temp write and the rename.
    write_guard: Mutex<()>,
}

impl JsonFilePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: RwLock::new(path.into()),
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        match self.path.read() {
            Ok(path) => path.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_path(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        match self.path.write() {
            Ok(mut current) => *current = path,
            Err(poisoned) => *poisoned.into_inner() = path,
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = OsString::from(path.as_os_str());
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

impl Configurable for JsonFilePersister {
    fn configure(&self, config: &ConfigParams) -> Result<()> {
        if let Some(path) = config.get("path") {
            self.set_path(path);
        }
        Ok(())
    }
}

impl Loader for JsonFilePersister {
    fn load(&self, correlation_id: &str) -> Result<Option<Vec<GenericRecord>>> {
        let path = self.path();
        if path.as_os_str().is_empty() {
            return Ok(None);
        }

        if !path.exists() {
            trace!(
                "[{}] Data file {} does not exist, starting empty",
                correlation_id,
                path.display()
            );
            return Ok(Some(Vec::new()));
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            PersistenceError::Load(format!("cannot read {}: {}", path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        let value: Value = serde_json::from_str(&content).map_err(|e| {
            PersistenceError::Load(format!("cannot parse {}: {}", path.display(), e))
        })?;

        match value {
            Value::Array(items) => Ok(Some(items)),
            _ => Err(PersistenceError::Load(format!(
                "{} does not contain a JSON array",
                path.display()
            ))),
        }
    }
}

impl Saver for JsonFilePersister {
    fn save(&self, correlation_id: &str, items: &[GenericRecord]) -> Result<()> {
        let path = self.path();
        if path.as_os_str().is_empty() {
            return Ok(());
        }

        let output = serde_json::to_vec_pretty(items)
            .map_err(|e| PersistenceError::Save(format!("cannot serialize items: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    PersistenceError::Save(format!("cannot create {}: {}", parent.display(), e))
                })?;
            }
        }

        let _guard = self
            .write_guard
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned("file write"))?;

        // Atomic write: write to temp, then rename
        let tmp_path = temp_path(&path);
        let written = fs::write(&tmp_path, &output).and_then(|_| fs::rename(&tmp_path, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(PersistenceError::Save(format!(
                "cannot write {}: {}",
                path.display(),
                e
            )));
        }

        trace!(
            "[{}] Wrote {} items to {}",
            correlation_id,
            items.len(),
            path.display()
        );
        Ok(())
    }
}
